use proptest::collection::vec as prop_vec;
use proptest::option;
use proptest::prelude::*;
use proptest::sample::select;
use serde_json::{Value, json};

pub const SERVICE_TYPES: [&str; 5] = ["compute", "image", "identity", "volume", "network"];
pub const REGIONS: [&str; 3] = ["North", "South", "East"];

/// Every spelling of an interface name a payload may carry.
pub const INTERFACE_NAMES: [&str; 6] = [
    "public",
    "publicURL",
    "internal",
    "internalURL",
    "admin",
    "adminURL",
];

/// Produces strings that only contain lowercase alphanumeric characters.
///
/// Handy for host names and ids that need no escaping in URLs.
pub fn alphanum_string(max_size: usize) -> impl Strategy<Value = String> {
    let ranges = vec!['a'..='z', '0'..='9'];
    prop::collection::vec(
        proptest::char::ranges(std::borrow::Cow::Owned(ranges)),
        1..=max_size,
    )
    .prop_map(|v| v.into_iter().collect())
}

/// Produces one of [`REGIONS`], or `None` for a global endpoint.
pub fn optional_region() -> impl Strategy<Value = Option<&'static str>> {
    option::of(select(REGIONS.to_vec()))
}

/// Produces a well formed v3 endpoint record.
pub fn v3_endpoint() -> impl Strategy<Value = Value> {
    (
        alphanum_string(8),
        select(INTERFACE_NAMES.to_vec()),
        optional_region(),
    )
        .prop_map(|(host, interface, region)| {
            let mut endpoint = json!({
                "id": format!("{host}-{interface}"),
                "interface": interface,
                "url": format!("http://{host}.host/{interface}"),
            });
            if let Some(region) = region {
                endpoint["region"] = json!(region);
            }
            endpoint
        })
}

/// Produces a v3 service record with up to `max_endpoints` endpoints.
pub fn v3_service(max_endpoints: usize) -> impl Strategy<Value = Value> {
    (
        select(SERVICE_TYPES.to_vec()),
        prop_vec(v3_endpoint(), 0..=max_endpoints),
    )
        .prop_map(|(service_type, endpoints)| {
            json!({
                "type": service_type,
                "endpoints": endpoints,
            })
        })
}

/// Produces a v3 authentication body with up to `max_services` service
/// records (duplicate types included) and an optional region hint.
pub fn v3_auth_body(max_services: usize) -> impl Strategy<Value = Value> {
    (
        prop_vec(v3_service(4), 0..=max_services),
        option::of(select(REGIONS.to_vec())),
    )
        .prop_map(|(catalog, region_name)| {
            let mut token = json!({ "catalog": catalog });
            if let Some(region_name) = region_name {
                token["region_name"] = json!(region_name);
            }
            json!({ "token": token })
        })
}
