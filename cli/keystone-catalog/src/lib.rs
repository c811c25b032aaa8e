//! Service catalog lookups for identity (Keystone) authentication responses.
//!
//! This crate provides:
//! - Parsing of the v2 and v3 catalog shapes into one normalized model
//! - Endpoint and URL queries filtered by service type, interface and region
//! - An [`AccessInfo`] owner and a [`SharedAccessInfo`] holder that swaps in
//!   a fresh catalog on re-authentication
//! - Layered configuration of the default region and interface
//!
//! ## Usage
//!
//! ```ignore
//! use keystone_catalog::{AccessInfo, EndpointQuery, Interface};
//!
//! let access = AccessInfo::factory(Some(&headers), &body, None)?;
//! let url = access.service_catalog().url_for(
//!     &EndpointQuery::new()
//!         .service_type("image")
//!         .interface(Interface::Internal)
//!         .region_name("South"),
//! )?;
//! ```

mod access;
mod catalog;
mod config;
mod error;
mod raw;
mod types;

pub use access::{AccessInfo, IdentityVersion, SUBJECT_TOKEN_HEADER, SharedAccessInfo};
pub use catalog::ServiceCatalog;
pub use crate::config::{CONFIG_FILE_NAME, CatalogConfig};
pub use error::{AccessInfoError, AttrParseError, CatalogError, ConfigError, InterfaceParseError};
pub use types::{
    AttrFilter,
    DEFAULT_SERVICE_TYPE,
    Endpoint,
    EndpointAttr,
    EndpointMap,
    EndpointQuery,
    Interface,
    ServiceEntry,
};
