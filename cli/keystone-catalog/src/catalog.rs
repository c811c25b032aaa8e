//! The service catalog and its query engine.

use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::error::CatalogError;
use crate::raw::{RawServiceV2, RawServiceV3};
use crate::types::{
    DEFAULT_SERVICE_TYPE,
    Endpoint,
    EndpointMap,
    EndpointQuery,
    Interface,
    ServiceEntry,
};

/// Immutable, indexed view of the services an authentication response
/// advertised.
///
/// Entries are grouped by service type at construction so a query only walks
/// the endpoints of the types it asks for. Insertion order is kept
/// throughout: when several endpoints qualify, the first one of the payload
/// wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    by_type: IndexMap<String, Vec<ServiceEntry>>,
    /// Region hint of the authentication response, used by queries that
    /// don't name a region.
    region_name: Option<String>,
}

impl ServiceCatalog {
    /// Build a catalog from normalized entries.
    ///
    /// Entries sharing a service type are kept in payload order under one
    /// key.
    pub fn new(
        entries: impl IntoIterator<Item = ServiceEntry>,
        region_name: Option<String>,
    ) -> Self {
        let mut by_type: IndexMap<String, Vec<ServiceEntry>> = IndexMap::new();
        for entry in entries {
            by_type
                .entry(entry.service_type.clone())
                .or_default()
                .push(entry);
        }

        debug!(
            service_types = by_type.len(),
            region_name = ?region_name,
            "built service catalog"
        );

        Self {
            by_type,
            region_name,
        }
    }

    pub(crate) fn from_v3(services: Vec<RawServiceV3>, region_name: Option<String>) -> Self {
        Self::new(
            services.into_iter().filter_map(RawServiceV3::into_entry),
            region_name,
        )
    }

    pub(crate) fn from_v2(services: Vec<RawServiceV2>, region_name: Option<String>) -> Self {
        Self::new(
            services.into_iter().filter_map(RawServiceV2::into_entry),
            region_name,
        )
    }

    /// The default region queries fall back to.
    pub fn region_name(&self) -> Option<&str> {
        self.region_name.as_deref()
    }

    /// True when the catalog has no services at all.
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Service types in catalog order.
    pub fn service_types(&self) -> impl Iterator<Item = &str> {
        self.by_type.keys().map(String::as_str)
    }

    /// All service entries, grouped by type.
    pub fn services(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.by_type.values().flatten()
    }

    /// Endpoints per service type matching `query`.
    ///
    /// A requested type that exists in the catalog always has a key, possibly
    /// with no endpoints; an unknown type has none. Without a service type
    /// every type in the catalog is reported. The interface is only filtered
    /// on when the query sets one.
    pub fn get_endpoints(&self, query: &EndpointQuery) -> EndpointMap {
        let filters = self.filters(query, query.interface);
        let mut found = EndpointMap::new();

        let mut collect = |service_type: &str, entries: &[ServiceEntry]| {
            if let Some(endpoints) = filters.select(entries) {
                found.insert(
                    service_type.to_string(),
                    endpoints.into_iter().cloned().collect(),
                );
            }
        };

        match query.service_type.as_deref() {
            Some(service_type) => {
                if let Some((key, entries)) = self.by_type.get_key_value(service_type) {
                    collect(key.as_str(), entries.as_slice());
                }
            },
            None => {
                for (key, entries) in &self.by_type {
                    collect(key.as_str(), entries.as_slice());
                }
            },
        }

        found
    }

    /// URLs of the endpoints matching `query`, in catalog order.
    ///
    /// Returns `None` when the service type is unknown or when no endpoint
    /// survives the service, interface and region filters. An attribute
    /// filter is applied after that check, so it can leave an empty list.
    pub fn get_urls(&self, query: &EndpointQuery) -> Option<Vec<String>> {
        let service_type = query
            .service_type
            .as_deref()
            .unwrap_or(DEFAULT_SERVICE_TYPE);
        let filters = self.filters(query, Some(query.interface.unwrap_or_default()));

        let endpoints = filters.select(self.by_type.get(service_type)?)?;
        if endpoints.is_empty() {
            return None;
        }

        let urls = endpoints
            .into_iter()
            .filter(|endpoint| {
                query
                    .attr_filter
                    .as_ref()
                    .is_none_or(|filter| endpoint.matches_attr(filter))
            })
            .map(|endpoint| endpoint.url.clone())
            .collect();
        Some(urls)
    }

    /// The URL of the first endpoint matching `query`.
    ///
    /// A region, explicit or the catalog default, is a hard constraint:
    /// endpoints of other regions are never returned in its place.
    #[instrument(skip_all, fields(
        service_type = ?query.service_type,
        interface = ?query.interface,
        region_name = ?query.region_name,
    ))]
    pub fn url_for(&self, query: &EndpointQuery) -> Result<String, CatalogError> {
        if self.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let url = self
            .get_urls(query)
            .and_then(|urls| urls.into_iter().next());

        match url {
            Some(url) => {
                debug!(%url, "resolved endpoint");
                Ok(url)
            },
            None => Err(CatalogError::EndpointNotFound {
                interface: query.interface.unwrap_or_default(),
                service_type: query
                    .service_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SERVICE_TYPE.to_string()),
                region: self.effective_region(query).map(str::to_string),
            }),
        }
    }

    /// An explicit query region wins over the catalog default.
    fn effective_region<'a>(&'a self, query: &'a EndpointQuery) -> Option<&'a str> {
        query
            .region_name
            .as_deref()
            .or(self.region_name.as_deref())
    }

    fn filters<'a>(
        &'a self,
        query: &'a EndpointQuery,
        interface: Option<Interface>,
    ) -> Filters<'a> {
        Filters {
            service_name: query.service_name.as_deref(),
            interface,
            region: self.effective_region(query),
        }
    }
}

/// Resolved per-query constraints.
struct Filters<'a> {
    service_name: Option<&'a str>,
    interface: Option<Interface>,
    region: Option<&'a str>,
}

impl Filters<'_> {
    fn admits(&self, entry: &ServiceEntry) -> bool {
        self.service_name
            .is_none_or(|name| entry.service_name.as_deref() == Some(name))
    }

    fn accepts(&self, endpoint: &Endpoint) -> bool {
        self.interface
            .is_none_or(|interface| endpoint.interface == interface)
            && self.region.is_none_or(|region| endpoint.serves_region(region))
    }

    /// Matching endpoints of one service type, or `None` if the name filter
    /// rules out every entry of the type.
    fn select<'e>(&self, entries: &'e [ServiceEntry]) -> Option<Vec<&'e Endpoint>> {
        let mut admitted = entries.iter().filter(|entry| self.admits(entry)).peekable();
        admitted.peek()?;
        Some(
            admitted
                .flat_map(|entry| &entry.endpoints)
                .filter(|endpoint| self.accepts(endpoint))
                .collect(),
        )
    }
}
