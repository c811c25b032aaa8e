use anyhow::Result;
use keystone_catalog::{
    AccessInfo,
    CatalogError,
    EndpointAttr,
    EndpointQuery,
    Interface,
    ServiceCatalog,
};
use keystone_test_utils::fixtures;
use keystone_test_utils::proptest::{INTERFACE_NAMES, REGIONS, v3_auth_body};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};

fn north_url(interface: Interface) -> String {
    format!("http://glance.north.host/glanceapi/{interface}")
}

fn south_url(interface: Interface) -> String {
    format!("http://glance.south.host/glanceapi/{interface}")
}

fn catalog_with_region(region_name: Option<&str>) -> Result<ServiceCatalog> {
    let mut body = fixtures::auth_response_body();
    if let Some(region_name) = region_name {
        body["token"]["region_name"] = json!(region_name);
    }
    let access = AccessInfo::factory(Some(&fixtures::auth_response_headers()), &body, None)?;
    Ok(access.service_catalog().clone())
}

#[test]
fn building_a_service_catalog() -> Result<()> {
    let catalog = catalog_with_region(None)?;

    let compute = EndpointQuery::new().service_type("compute");
    assert_eq!(
        catalog.url_for(&compute)?,
        "https://compute.north.host/novapi/public"
    );
    assert_eq!(
        catalog.url_for(&compute.clone().interface(Interface::Internal))?,
        "https://compute.north.host/novapi/internal"
    );
    assert!(matches!(
        catalog.url_for(&compute.attr(EndpointAttr::Region, "South")),
        Err(CatalogError::EndpointNotFound { .. })
    ));
    Ok(())
}

#[test]
fn service_catalog_endpoints() -> Result<()> {
    let catalog = catalog_with_region(None)?;
    let endpoints = catalog.get_endpoints(
        &EndpointQuery::new()
            .service_type("compute")
            .interface(Interface::Public),
    );
    assert_eq!(endpoints["compute"][0].region.as_deref(), Some("North"));
    assert_eq!(
        endpoints["compute"][0].url,
        "https://compute.north.host/novapi/public"
    );
    Ok(())
}

#[test]
fn service_catalog_regions() -> Result<()> {
    let catalog = catalog_with_region(Some("North"))?;
    let query = EndpointQuery::new()
        .service_type("image")
        .interface(Interface::Public);
    assert_eq!(catalog.url_for(&query)?, north_url(Interface::Public));

    let catalog = catalog_with_region(Some("South"))?;
    let query = EndpointQuery::new()
        .service_type("image")
        .interface(Interface::Internal);
    assert_eq!(catalog.url_for(&query)?, south_url(Interface::Internal));
    Ok(())
}

#[test]
fn service_catalog_empty() -> Result<()> {
    let access = AccessInfo::factory(None, &fixtures::empty_catalog_body(), None)?;
    let query = EndpointQuery::new()
        .service_type("image")
        .endpoint_type("internalURL")?;
    assert_eq!(
        access.service_catalog().url_for(&query),
        Err(CatalogError::EmptyCatalog)
    );
    Ok(())
}

#[test]
fn get_endpoints_region_names() -> Result<()> {
    let catalog = catalog_with_region(None)?;

    let expectations: [(&str, fn(Interface) -> String); 2] =
        [("North", north_url), ("South", south_url)];
    for (region, expected) in expectations {
        let query = EndpointQuery::new()
            .service_type("image")
            .region_name(region);
        let endpoints = catalog.get_endpoints(&query);
        assert_eq!(endpoints.len(), 1);
        for endpoint in &endpoints["image"] {
            assert_eq!(endpoint.url, expected(endpoint.interface));
        }
    }

    let compute = EndpointQuery::new().service_type("compute");
    assert_eq!(catalog.get_endpoints(&compute)["compute"].len(), 3);
    let north = compute.clone().region_name("North");
    assert_eq!(catalog.get_endpoints(&north)["compute"].len(), 3);
    let west = compute.region_name("West");
    assert_eq!(catalog.get_endpoints(&west)["compute"].len(), 0);
    Ok(())
}

#[test]
fn url_for_region_names() -> Result<()> {
    let catalog = catalog_with_region(None)?;
    let image = EndpointQuery::new().service_type("image");

    assert_eq!(
        catalog.url_for(&image.clone().region_name("North"))?,
        north_url(Interface::Public)
    );
    assert_eq!(
        catalog.url_for(&image.clone().region_name("South"))?,
        south_url(Interface::Public)
    );
    assert!(matches!(
        catalog.url_for(&image.region_name("West")),
        Err(CatalogError::EndpointNotFound { .. })
    ));
    Ok(())
}

#[test]
fn get_urls_region_names() -> Result<()> {
    let catalog = catalog_with_region(None)?;
    let image = EndpointQuery::new().service_type("image");

    assert_eq!(catalog.get_urls(&image).map(|urls| urls.len()), Some(2));
    assert_eq!(
        catalog.get_urls(&image.clone().region_name("North")),
        Some(vec![north_url(Interface::Public)])
    );
    assert_eq!(
        catalog.get_urls(&image.clone().region_name("South")),
        Some(vec![south_url(Interface::Public)])
    );
    assert_eq!(catalog.get_urls(&image.region_name("West")), None);
    Ok(())
}

#[test]
fn param_overrides_body_region() -> Result<()> {
    let catalog = catalog_with_region(Some("North"))?;
    let image = EndpointQuery::new().service_type("image");

    assert_eq!(catalog.url_for(&image)?, north_url(Interface::Public));
    assert_eq!(
        catalog.url_for(&image.clone().region_name("South"))?,
        south_url(Interface::Public)
    );

    let endpoints = catalog.get_endpoints(&image);
    assert_eq!(endpoints["image"].len(), 3);
    for endpoint in &endpoints["image"] {
        assert_eq!(endpoint.url, north_url(endpoint.interface));
    }

    let endpoints = catalog.get_endpoints(&image.region_name("South"));
    assert_eq!(endpoints["image"].len(), 3);
    for endpoint in &endpoints["image"] {
        assert_eq!(endpoint.url, south_url(endpoint.interface));
    }
    Ok(())
}

#[test]
fn endpoints_serialize_as_plain_records() -> Result<()> {
    let catalog = catalog_with_region(Some("South"))?;
    let endpoints = catalog.get_endpoints(
        &EndpointQuery::new()
            .service_type("image")
            .interface(Interface::Admin),
    );
    assert_eq!(
        serde_json::to_value(&endpoints)?,
        json!({
            "image": [{
                "id": "image-south-admin",
                "region": "South",
                "interface": "admin",
                "url": "http://glance.south.host/glanceapi/admin"
            }]
        })
    );
    Ok(())
}

fn raw_endpoint_count(body: &Value) -> usize {
    body["token"]["catalog"]
        .as_array()
        .map(|services| {
            services
                .iter()
                .filter_map(|service| service["endpoints"].as_array())
                .map(Vec::len)
                .sum()
        })
        .unwrap_or_default()
}

proptest! {
    #[test]
    fn every_raw_endpoint_is_reachable(body in v3_auth_body(6)) {
        let access = AccessInfo::factory(None, &body, None).unwrap();
        let catalog = access.service_catalog();
        let reported: usize = REGIONS
            .iter()
            .map(|region| {
                catalog
                    .get_endpoints(&EndpointQuery::new().region_name(*region))
                    .values()
                    .flatten()
                    .filter(|endpoint| endpoint.region.as_deref() == Some(*region))
                    .count()
            })
            .sum::<usize>()
            + catalog
                .get_endpoints(&EndpointQuery::new().region_name("Nowhere"))
                .values()
                .map(Vec::len)
                .sum::<usize>();
        prop_assert_eq!(reported, raw_endpoint_count(&body));
    }

    #[test]
    fn legacy_spellings_query_alike(
        body in v3_auth_body(6),
        index in 0..INTERFACE_NAMES.len() / 2,
    ) {
        let access = AccessInfo::factory(None, &body, None).unwrap();
        let catalog = access.service_catalog();
        let canonical = INTERFACE_NAMES[index * 2];
        let legacy = INTERFACE_NAMES[index * 2 + 1];

        for service_type in catalog.service_types() {
            let query = EndpointQuery::new().service_type(service_type);
            let by_canonical = query.clone().endpoint_type(canonical).unwrap();
            let by_legacy = query.endpoint_type(legacy).unwrap();
            prop_assert_eq!(catalog.get_urls(&by_canonical), catalog.get_urls(&by_legacy));
            prop_assert_eq!(catalog.url_for(&by_canonical), catalog.url_for(&by_legacy));
        }
    }

    #[test]
    fn non_empty_catalog_never_reports_empty(body in v3_auth_body(6), service_type in "[a-z]{1,8}") {
        let access = AccessInfo::factory(None, &body, None).unwrap();
        let catalog = access.service_catalog();
        prop_assume!(!catalog.is_empty());
        let result = catalog.url_for(&EndpointQuery::new().service_type(service_type));
        prop_assert_ne!(result, Err(CatalogError::EmptyCatalog));
    }
}
