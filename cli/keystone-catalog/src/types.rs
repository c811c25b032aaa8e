//! Catalog domain types.
//!
//! These are the normalized forms of the service records found in an
//! authentication response. Queries hand out clones of [`Endpoint`] so
//! callers never hold references into the catalog.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AttrParseError, InterfaceParseError};

/// Service type used by `url_for` and `get_urls` when the query names none.
pub const DEFAULT_SERVICE_TYPE: &str = "identity";

/// Endpoints grouped by service type, in catalog order.
pub type EndpointMap = IndexMap<String, Vec<Endpoint>>;

// ---------------------------------------------------------------------------
// Interfaces
// ---------------------------------------------------------------------------

/// Network visibility class of an endpoint.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    derive_more::Display,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Interface {
    #[default]
    #[display("public")]
    Public,
    #[display("internal")]
    Internal,
    #[display("admin")]
    Admin,
}

/// Every accepted spelling of an interface name.
///
/// The `...URL` forms are the keys v2 endpoint records use and are still
/// passed around as `endpoint_type` by older callers.
const INTERFACE_ALIASES: &[(&str, Interface)] = &[
    ("public", Interface::Public),
    ("publicURL", Interface::Public),
    ("internal", Interface::Internal),
    ("internalURL", Interface::Internal),
    ("admin", Interface::Admin),
    ("adminURL", Interface::Admin),
];

impl Interface {
    /// All interfaces in the order v2 records are expanded.
    pub const ALL: [Interface; 3] = [Interface::Public, Interface::Internal, Interface::Admin];

    /// The canonical (v3) name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interface::Public => "public",
            Interface::Internal => "internal",
            Interface::Admin => "admin",
        }
    }
}

impl FromStr for Interface {
    type Err = InterfaceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        INTERFACE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == s)
            .map(|(_, interface)| *interface)
            .ok_or_else(|| InterfaceParseError(s.to_string()))
    }
}

impl TryFrom<String> for Interface {
    type Error = InterfaceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Endpoints and services
// ---------------------------------------------------------------------------

/// A single concrete endpoint of a service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `None` marks a global endpoint that serves every region.
    #[serde(default)]
    pub region: Option<String>,
    pub interface: Interface,
    pub url: String,
}

impl Endpoint {
    /// Whether this endpoint may be used for `region`.
    pub fn serves_region(&self, region: &str) -> bool {
        self.region.as_deref().is_none_or(|own| own == region)
    }

    /// Whether the endpoint carries `filter.value` in `filter.attr`.
    pub fn matches_attr(&self, filter: &AttrFilter) -> bool {
        match filter.attr {
            EndpointAttr::Region => self.region.as_deref() == Some(filter.value.as_str()),
            EndpointAttr::Interface => filter
                .value
                .parse::<Interface>()
                .is_ok_and(|interface| interface == self.interface),
            EndpointAttr::Url => self.url == filter.value,
            EndpointAttr::Id => self.id.as_deref() == Some(filter.value.as_str()),
        }
    }
}

/// One service record of the catalog.
///
/// Several entries may share a `service_type`; the catalog groups them and
/// queries see their endpoints concatenated in payload order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub service_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Endpoint attributes a query can match exactly.
#[derive(Clone, Copy, Debug, derive_more::Display, Eq, PartialEq)]
pub enum EndpointAttr {
    #[display("region")]
    Region,
    #[display("interface")]
    Interface,
    #[display("url")]
    Url,
    #[display("id")]
    Id,
}

impl FromStr for EndpointAttr {
    type Err = AttrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "region" | "region_id" => Ok(EndpointAttr::Region),
            "interface" => Ok(EndpointAttr::Interface),
            "url" => Ok(EndpointAttr::Url),
            "id" => Ok(EndpointAttr::Id),
            other => Err(AttrParseError(other.to_string())),
        }
    }
}

/// Restricts candidate endpoints to those whose `attr` equals `value`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttrFilter {
    pub attr: EndpointAttr,
    pub value: String,
}

impl AttrFilter {
    pub fn new(attr: EndpointAttr, value: impl Into<String>) -> Self {
        Self {
            attr,
            value: value.into(),
        }
    }
}

/// Filter parameters shared by all catalog queries.
///
/// Unset fields mean "no constraint", except where an operation documents a
/// default (`url_for` and `get_urls` fall back to [`DEFAULT_SERVICE_TYPE`]
/// and [`Interface::Public`]; every query falls back to the catalog's
/// default region).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EndpointQuery {
    pub service_type: Option<String>,
    pub service_name: Option<String>,
    pub interface: Option<Interface>,
    pub region_name: Option<String>,
    pub attr_filter: Option<AttrFilter>,
}

impl EndpointQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    pub fn interface(mut self, interface: Interface) -> Self {
        self.interface = Some(interface);
        self
    }

    /// Set the interface from any accepted spelling, e.g. `"internalURL"`.
    pub fn endpoint_type(self, endpoint_type: &str) -> Result<Self, InterfaceParseError> {
        Ok(self.interface(endpoint_type.parse()?))
    }

    pub fn region_name(mut self, region_name: impl Into<String>) -> Self {
        self.region_name = Some(region_name.into());
        self
    }

    pub fn attr(mut self, attr: EndpointAttr, value: impl Into<String>) -> Self {
        self.attr_filter = Some(AttrFilter::new(attr, value));
        self
    }
}
