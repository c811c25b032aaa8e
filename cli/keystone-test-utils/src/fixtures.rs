//! Example authentication responses

use http::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

pub const AUTH_SUBJECT_TOKEN: &str = "3e2813b7ba0b4006840c3825860b86ed";

/// Headers of a v3 authentication response.
pub fn auth_response_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-subject-token", HeaderValue::from_static(AUTH_SUBJECT_TOKEN));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers
}

/// v3 response body with:
/// - `compute`: public, internal and admin endpoints in `North`
/// - `image`: public, internal and admin endpoints in both `North` and `South`
/// - `identity`: public and admin endpoints in `North`
///
/// No `region_name` hint is set; tests add one where they need it.
pub fn auth_response_body() -> Value {
    json!({
        "token": {
            "methods": ["password"],
            "expires_at": "2038-01-19T03:14:07.000000Z",
            "issued_at": "2026-10-16T09:00:00.000000Z",
            "user": {
                "id": "c4da488862bd435c9e6c0275a0d0e49a",
                "name": "exampleuser",
                "domain": {"id": "default", "name": "Default"}
            },
            "project": {
                "id": "225da22d3ce34b15877ea70b2a575f58",
                "name": "exampleproject",
                "domain": {"id": "default", "name": "Default"}
            },
            "catalog": [
                {
                    "type": "compute",
                    "name": "nova",
                    "endpoints": [
                        {
                            "id": "compute-public",
                            "interface": "public",
                            "region": "North",
                            "url": "https://compute.north.host/novapi/public"
                        },
                        {
                            "id": "compute-internal",
                            "interface": "internal",
                            "region": "North",
                            "url": "https://compute.north.host/novapi/internal"
                        },
                        {
                            "id": "compute-admin",
                            "interface": "admin",
                            "region": "North",
                            "url": "https://compute.north.host/novapi/admin"
                        }
                    ]
                },
                {
                    "type": "image",
                    "name": "glance",
                    "endpoints": [
                        {
                            "id": "image-north-public",
                            "interface": "public",
                            "region": "North",
                            "url": "http://glance.north.host/glanceapi/public"
                        },
                        {
                            "id": "image-north-internal",
                            "interface": "internal",
                            "region": "North",
                            "url": "http://glance.north.host/glanceapi/internal"
                        },
                        {
                            "id": "image-north-admin",
                            "interface": "admin",
                            "region": "North",
                            "url": "http://glance.north.host/glanceapi/admin"
                        },
                        {
                            "id": "image-south-public",
                            "interface": "public",
                            "region": "South",
                            "url": "http://glance.south.host/glanceapi/public"
                        },
                        {
                            "id": "image-south-internal",
                            "interface": "internal",
                            "region": "South",
                            "url": "http://glance.south.host/glanceapi/internal"
                        },
                        {
                            "id": "image-south-admin",
                            "interface": "admin",
                            "region": "South",
                            "url": "http://glance.south.host/glanceapi/admin"
                        }
                    ]
                },
                {
                    "type": "identity",
                    "name": "keystone",
                    "endpoints": [
                        {
                            "id": "identity-public",
                            "interface": "public",
                            "region": "North",
                            "url": "https://identity.north.host/identityapi/v3"
                        },
                        {
                            "id": "identity-admin",
                            "interface": "admin",
                            "region": "North",
                            "url": "https://identity.north.host/identityapi/admin/v3"
                        }
                    ]
                }
            ]
        }
    })
}

/// v2 rendition of [`auth_response_body`], with the token id in the body.
pub fn v2_auth_response_body() -> Value {
    json!({
        "access": {
            "token": {
                "id": AUTH_SUBJECT_TOKEN,
                "expires": "2038-01-19T03:14:07Z",
                "tenant": {"id": "225da22d3ce34b15877ea70b2a575f58", "name": "exampleproject"}
            },
            "user": {"id": "c4da488862bd435c9e6c0275a0d0e49a", "name": "exampleuser"},
            "serviceCatalog": [
                {
                    "type": "compute",
                    "name": "nova",
                    "endpoints": [{
                        "id": "compute-north",
                        "region": "North",
                        "publicURL": "https://compute.north.host/novapi/public",
                        "internalURL": "https://compute.north.host/novapi/internal",
                        "adminURL": "https://compute.north.host/novapi/admin"
                    }]
                },
                {
                    "type": "image",
                    "name": "glance",
                    "endpoints": [
                        {
                            "id": "image-north",
                            "region": "North",
                            "publicURL": "http://glance.north.host/glanceapi/public",
                            "internalURL": "http://glance.north.host/glanceapi/internal",
                            "adminURL": "http://glance.north.host/glanceapi/admin"
                        },
                        {
                            "id": "image-south",
                            "region": "South",
                            "publicURL": "http://glance.south.host/glanceapi/public",
                            "internalURL": "http://glance.south.host/glanceapi/internal",
                            "adminURL": "http://glance.south.host/glanceapi/admin"
                        }
                    ]
                },
                {
                    "type": "identity",
                    "name": "keystone",
                    "endpoints": [{
                        "id": "identity-north",
                        "region": "North",
                        "publicURL": "https://identity.north.host/identityapi/v3",
                        "adminURL": "https://identity.north.host/identityapi/admin/v3"
                    }]
                }
            ]
        }
    })
}

/// A v3 body whose catalog is an empty list.
pub fn empty_catalog_body() -> Value {
    let mut body = auth_response_body();
    body["token"]["catalog"] = json!([]);
    body
}
