//! Access information extracted from an identity authentication response.

use std::sync::{Arc, PoisonError, RwLock};

use http::HeaderMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::catalog::ServiceCatalog;
use crate::config::CatalogConfig;
use crate::error::AccessInfoError;
use crate::raw::{AccessV2, TokenV3};

/// Header carrying the token of a v3 authentication response.
pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// Identity API version an authentication response was issued by.
#[derive(Clone, Copy, Debug, derive_more::Display, Eq, PartialEq)]
pub enum IdentityVersion {
    #[display("v2.0")]
    V2,
    #[display("v3")]
    V3,
}

/// The parts of an authentication response this crate cares about: the
/// token, the region hint and the service catalog built from them.
#[derive(Clone, Debug)]
pub struct AccessInfo {
    version: IdentityVersion,
    auth_token: Option<String>,
    region_name: Option<String>,
    service_catalog: ServiceCatalog,
}

impl AccessInfo {
    /// Build access info from a parsed authentication response.
    ///
    /// The version is detected from the body (`token` for v3, `access` for
    /// v2). `region_name` overrides the region hint carried in the body and
    /// becomes the default region of the service catalog.
    #[instrument(skip_all)]
    pub fn factory(
        headers: Option<&HeaderMap>,
        body: &Value,
        region_name: Option<String>,
    ) -> Result<Self, AccessInfoError> {
        if let Some(token) = body.get("token") {
            let token = TokenV3::deserialize(token).map_err(|err| {
                AccessInfoError::Deserialize {
                    version: IdentityVersion::V3,
                    err,
                }
            })?;
            let auth_token = headers
                .and_then(|headers| headers.get(SUBJECT_TOKEN_HEADER))
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let region_name = region_name.or(token.region_name);
            debug!(
                version = %IdentityVersion::V3,
                region_name = ?region_name,
                "parsed access info"
            );

            return Ok(Self {
                version: IdentityVersion::V3,
                auth_token,
                service_catalog: ServiceCatalog::from_v3(
                    token.catalog.unwrap_or_default(),
                    region_name.clone(),
                ),
                region_name,
            });
        }

        if let Some(access) = body.get("access") {
            let access = AccessV2::deserialize(access).map_err(|err| {
                AccessInfoError::Deserialize {
                    version: IdentityVersion::V2,
                    err,
                }
            })?;
            let auth_token = access.token.and_then(|token| token.id);
            let region_name = region_name.or(access.region_name);
            debug!(
                version = %IdentityVersion::V2,
                region_name = ?region_name,
                "parsed access info"
            );

            return Ok(Self {
                version: IdentityVersion::V2,
                auth_token,
                service_catalog: ServiceCatalog::from_v2(
                    access.service_catalog.unwrap_or_default(),
                    region_name.clone(),
                ),
                region_name,
            });
        }

        Err(AccessInfoError::UnrecognizedPayload)
    }

    /// Like [`AccessInfo::factory`], taking the region override from `config`.
    pub fn from_config(
        headers: Option<&HeaderMap>,
        body: &Value,
        config: &CatalogConfig,
    ) -> Result<Self, AccessInfoError> {
        Self::factory(headers, body, config.region_name.clone())
    }

    pub fn version(&self) -> IdentityVersion {
        self.version
    }

    /// The token the response was issued for, if the response carried one.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn region_name(&self) -> Option<&str> {
        self.region_name.as_deref()
    }

    pub fn service_catalog(&self) -> &ServiceCatalog {
        &self.service_catalog
    }
}

/// Holder for the current [`AccessInfo`] of a long lived client.
///
/// Re-authenticating publishes a whole new value; readers that already
/// loaded the previous one keep a consistent catalog until they drop it.
#[derive(Debug)]
pub struct SharedAccessInfo {
    current: RwLock<Arc<AccessInfo>>,
}

impl SharedAccessInfo {
    pub fn new(access_info: AccessInfo) -> Self {
        Self {
            current: RwLock::new(Arc::new(access_info)),
        }
    }

    /// The currently published access info.
    pub fn load(&self) -> Arc<AccessInfo> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Publish `access_info`, returning the value it replaced.
    pub fn replace(&self, access_info: AccessInfo) -> Arc<AccessInfo> {
        let replacement = Arc::new(access_info);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        debug!(
            region_name = ?replacement.region_name(),
            "replacing access info"
        );
        std::mem::replace(&mut *current, replacement)
    }
}
