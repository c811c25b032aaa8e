//! Error handling for catalog construction and queries.

use thiserror::Error;

use crate::types::Interface;

/// Errors raised by [`crate::ServiceCatalog::url_for`].
///
/// Both variants describe a mismatch between the request and the deployed
/// topology, so neither is worth retrying.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("the service catalog is empty")]
    EmptyCatalog,
    #[error(
        "{interface} endpoint for {service_type} service{}",
        fmt_region(.region)
    )]
    EndpointNotFound {
        interface: Interface,
        service_type: String,
        region: Option<String>,
    },
}

fn fmt_region(region: &Option<String>) -> String {
    match region {
        Some(region) => format!(" in {region} region"),
        None => String::new(),
    }
}

/// Errors building an [`crate::AccessInfo`] from an authentication response.
#[derive(Debug, Error)]
pub enum AccessInfoError {
    #[error("authentication response has neither a 'token' nor an 'access' object")]
    UnrecognizedPayload,
    #[error("failed to parse {version} authentication response")]
    Deserialize {
        version: crate::access::IdentityVersion,
        #[source]
        err: serde_json::Error,
    },
}

/// Errors loading a [`crate::CatalogConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load catalog configuration")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown interface '{0}'")]
pub struct InterfaceParseError(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown endpoint attribute '{0}'")]
pub struct AttrParseError(pub String);
