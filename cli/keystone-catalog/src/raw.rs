//! Wire shapes of the catalog inside identity authentication responses.
//!
//! Every field is optional. Records missing what the catalog needs are
//! dropped with a warning during normalization instead of failing the whole
//! response.

use serde::Deserialize;
use tracing::warn;

use crate::types::{Endpoint, Interface, ServiceEntry};

// ---------------------------------------------------------------------------
// v3: {"token": {"catalog": [...]}}
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenV3 {
    #[serde(default)]
    pub catalog: Option<Vec<RawServiceV3>>,
    #[serde(default)]
    pub region_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawServiceV3 {
    #[serde(rename = "type", default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub endpoints: Option<Vec<RawEndpointV3>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEndpointV3 {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawServiceV3 {
    pub(crate) fn into_entry(self) -> Option<ServiceEntry> {
        let Some(service_type) = self.service_type else {
            warn!(name = ?self.name, "skipping catalog service without a type");
            return None;
        };

        let endpoints = self
            .endpoints
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| raw.into_endpoint(&service_type))
            .collect();

        Some(ServiceEntry {
            service_type,
            service_name: self.name,
            endpoints,
        })
    }
}

impl RawEndpointV3 {
    fn into_endpoint(self, service_type: &str) -> Option<Endpoint> {
        let Some(url) = self.url else {
            warn!(service_type, id = ?self.id, "skipping endpoint without a url");
            return None;
        };
        let interface = match self.interface.as_deref().map(str::parse::<Interface>) {
            Some(Ok(interface)) => interface,
            Some(Err(err)) => {
                warn!(service_type, %url, "skipping endpoint: {err}");
                return None;
            },
            None => {
                warn!(service_type, %url, "skipping endpoint without an interface");
                return None;
            },
        };

        Some(Endpoint {
            id: self.id,
            region: self.region.or(self.region_id),
            interface,
            url,
        })
    }
}

// ---------------------------------------------------------------------------
// v2: {"access": {"serviceCatalog": [...]}}
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AccessV2 {
    #[serde(default)]
    pub token: Option<RawTokenV2>,
    #[serde(rename = "serviceCatalog", default)]
    pub service_catalog: Option<Vec<RawServiceV2>>,
    #[serde(default)]
    pub region_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTokenV2 {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawServiceV2 {
    #[serde(rename = "type", default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub endpoints: Option<Vec<RawEndpointV2>>,
}

/// A v2 endpoint record carries one URL per interface.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEndpointV2 {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(rename = "publicURL", default)]
    pub public_url: Option<String>,
    #[serde(rename = "internalURL", default)]
    pub internal_url: Option<String>,
    #[serde(rename = "adminURL", default)]
    pub admin_url: Option<String>,
}

impl RawServiceV2 {
    pub(crate) fn into_entry(self) -> Option<ServiceEntry> {
        let Some(service_type) = self.service_type else {
            warn!(name = ?self.name, "skipping catalog service without a type");
            return None;
        };

        let mut endpoints = Vec::new();
        for raw in self.endpoints.unwrap_or_default() {
            let expanded = raw.into_endpoints();
            if expanded.is_empty() {
                warn!(%service_type, "skipping endpoint record without any url");
            }
            endpoints.extend(expanded);
        }

        Some(ServiceEntry {
            service_type,
            service_name: self.name,
            endpoints,
        })
    }
}

impl RawEndpointV2 {
    /// Split the record into one [`Endpoint`] per URL present, ordered
    /// public, internal, admin.
    fn into_endpoints(self) -> Vec<Endpoint> {
        let RawEndpointV2 {
            id,
            region,
            public_url,
            internal_url,
            admin_url,
        } = self;

        Interface::ALL
            .into_iter()
            .zip([public_url, internal_url, admin_url])
            .filter_map(|(interface, url)| {
                Some(Endpoint {
                    id: id.clone(),
                    region: region.clone(),
                    interface,
                    url: url?,
                })
            })
            .collect()
    }
}
