//! End-to-end resolution against the fixture site.

use std::collections::BTreeMap;

use page_resolver::components::{FOOTER_ORDER, HEADER_ORDER};
use page_resolver::model::Scope;
use page_resolver::{ResolveError, ResolvedPageWithComponents, Resolver};
use serde_json::json;

mod common;

async fn resolve(resolver: &Resolver, tenant: &str, path: &str) -> ResolvedPageWithComponents {
    resolver
        .resolve(tenant, path, &BTreeMap::new())
        .await
        .unwrap_or_else(|e| panic!("{} {} failed: {}", tenant, path, e))
}

async fn resolve_err(resolver: &Resolver, tenant: &str, path: &str) -> ResolveError {
    resolver
        .resolve(tenant, path, &BTreeMap::new())
        .await
        .expect_err("resolution should fail")
}

fn component_ids(resolved: &ResolvedPageWithComponents) -> Vec<&str> {
    resolved.components.iter().map(|c| c.id.as_str()).collect()
}

#[tokio::test]
async fn test_localized_alias_to_single_entity() {
    let resolver = common::resolver(common::store());
    let resolved = resolve(&resolver, "acme", "/en/locations/santo-domingo").await;

    let page = &resolved.page;
    assert_eq!(page.page_type_code, "ubicaciones_single");
    assert_eq!(page.language, "en");
    assert_eq!(page.entity_id.as_deref(), Some("sec-santo-domingo"));
    assert_eq!(page.slug, "santo-domingo");
    assert!(page.is_virtual);

    assert_eq!(
        component_ids(&resolved),
        vec!["ci-header", "ci-sector", "ci-whatsapp", "ci-footer"]
    );

    let binding = resolved.components[1]
        .merged_config
        .dynamic_data
        .as_ref()
        .and_then(|d| d.binding.as_ref())
        .expect("sector detail is bound");
    assert_eq!(binding.entity_id.as_deref(), Some("sec-santo-domingo"));
    assert_eq!(binding.language, "en");
    assert_eq!(binding.page_type_code, "ubicaciones_single");
}

#[tokio::test]
async fn test_categorized_single() {
    let resolver = common::resolver(common::store());
    let resolved = resolve(&resolver, "acme", "/testimonios/vendedores/juan-rafael").await;

    let page = &resolved.page;
    assert_eq!(page.page_type_code, "testimonio_single");
    assert_eq!(page.language, "es");
    assert_eq!(page.category_slug.as_deref(), Some("vendedores"));
    assert_eq!(page.entity_id.as_deref(), Some("tes-juan-rafael"));
    assert_eq!(page.title, "Juan Rafael");
    assert!(component_ids(&resolved).contains(&"ci-testimonial"));
}

#[tokio::test]
async fn test_translated_category_slug() {
    let resolver = common::resolver(common::store());
    let resolved = resolve(&resolver, "acme", "/en/testimonials/sellers").await;

    assert_eq!(resolved.page.page_type_code, "testimonios_categoria");
    assert_eq!(resolved.page.category_slug.as_deref(), Some("vendedores"));
    assert_eq!(resolved.page.title, "Sellers");
}

#[tokio::test]
async fn test_homepage() {
    let resolver = common::resolver(common::store());
    let resolved = resolve(&resolver, "acme", "/").await;

    let page = &resolved.page;
    assert_eq!(page.page_type_code, "homepage");
    assert_eq!(page.page_id.as_deref(), Some("page-home"));
    assert_eq!(page.title, "Inicio");
    assert!(!page.is_virtual);

    assert_eq!(
        component_ids(&resolved),
        vec!["ci-header", "ci-hero", "ci-properties", "ci-whatsapp", "ci-footer"]
    );
    assert_eq!(resolved.components.first().unwrap().order, HEADER_ORDER);
    assert_eq!(resolved.components.last().unwrap().order, FOOTER_ORDER);
    assert_eq!(resolved.components[0].scope, Scope::Tenant);

    // Empty path is the root too.
    let empty = resolve(&resolver, "acme", "").await;
    assert_eq!(empty, resolved);
}

#[tokio::test]
async fn test_three_layer_merge() {
    let resolver = common::resolver(common::store());
    let resolved = resolve(&resolver, "acme", "/").await;

    let hero = &resolved.components[1].merged_config;
    assert_eq!(hero.static_data["title"], json!("Bienvenidos a Acme"));
    assert_eq!(hero.static_data["subtitle"], json!("Encuentra tu hogar"));
    assert_eq!(hero.static_data["layout"], json!("centered"));
    assert_eq!(hero.styles["color"], json!("blue"));

    let properties = resolved.components[2]
        .merged_config
        .dynamic_data
        .as_ref()
        .unwrap();
    assert_eq!(properties.data_type.as_deref(), Some("propiedades"));
    assert_eq!(properties.params["limit"], json!(12));
    assert_eq!(properties.params["order"], json!("recent"));

    // Global template defaults reach tenant-wide instances.
    let header = &resolved.components[0].merged_config;
    assert_eq!(header.static_data["logo"], json!("/logo.svg"));
}

#[tokio::test]
async fn test_query_parameters_bound() {
    let resolver = common::resolver(common::store());
    let resolved = resolver
        .resolve("acme", "/", &common::query(&[("page", "2"), ("sort", "price")]))
        .await
        .unwrap();

    let binding = resolved.components[2]
        .merged_config
        .dynamic_data
        .as_ref()
        .and_then(|d| d.binding.as_ref())
        .unwrap();
    assert_eq!(binding.query.get("page").map(String::as_str), Some("2"));
    assert_eq!(binding.query.get("sort").map(String::as_str), Some("price"));
    assert_eq!(binding.page_type_code, "homepage");

    // Static components carry no binding.
    assert!(resolved.components[1].merged_config.dynamic_data.is_none());
}

#[tokio::test]
async fn test_unknown_segment_is_route_not_found() {
    let resolver = common::resolver(common::store());
    let err = resolve_err(&resolver, "acme", "/foobar-does-not-exist").await;
    match err {
        ResolveError::RouteNotFound { path } => assert_eq!(path, "/foobar-does-not-exist"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_route_and_entity_errors_are_distinct() {
    let resolver = common::resolver(common::store());

    let err = resolve_err(&resolver, "acme", "/ubicaciones/santo-domingo/extra").await;
    assert_eq!(err.code(), "route_not_found");

    let err = resolve_err(&resolver, "acme", "/propiedades/casa-inexistente").await;
    match err {
        ResolveError::EntityNotFound { table, slug } => {
            assert_eq!(table, "propiedades");
            assert_eq!(slug, "casa-inexistente");
        }
        other => panic!("unexpected error {:?}", other),
    }

    let err = resolve_err(&resolver, "acme", "/testimonios/compradores/juan-rafael").await;
    assert_eq!(err.code(), "entity_not_found");
}

#[tokio::test]
async fn test_unknown_tenant() {
    let resolver = common::resolver(common::store());
    let err = resolve_err(&resolver, "nobody", "/").await;
    assert!(matches!(err, ResolveError::TenantNotFound(ref id) if id == "nobody"));
}

#[tokio::test]
async fn test_slug_language_fallback() {
    let resolver = common::resolver(common::store());

    // Translated slug in the requested language.
    let page = resolve(&resolver, "acme", "/en/ubicaciones/punta-cana-beach").await.page;
    assert_eq!(page.entity_id.as_deref(), Some("sec-punta-cana"));
    assert_eq!(page.slug, "punta-cana");

    // No French slug: canonical slug still resolves.
    let page = resolve(&resolver, "acme", "/fr/ubicaciones/santo-domingo").await.page;
    assert_eq!(page.entity_id.as_deref(), Some("sec-santo-domingo"));
    assert_eq!(page.language, "fr");

    // Default-language slug from the French site.
    let page = resolve(&resolver, "acme", "/fr/propiedades/villa-junto-al-mar").await.page;
    assert_eq!(page.entity_id.as_deref(), Some("prop-villa"));
    assert_eq!(page.title, "Villa del Mar");

    // An English slug is not valid on the French site.
    let err = resolve_err(&resolver, "acme", "/fr/propiedades/seaside-villa").await;
    assert_eq!(err.code(), "entity_not_found");
}

#[tokio::test]
async fn test_tenant_alias_overrides() {
    let resolver = common::resolver(common::store());

    let page = resolve(&resolver, "acme", "/en/listings/seaside-villa").await.page;
    assert_eq!(page.page_type_code, "propiedad_single");
    assert_eq!(page.title, "Seaside Villa");

    // The catalog alias was replaced for this tenant.
    let err = resolve_err(&resolver, "acme", "/en/properties/seaside-villa").await;
    assert_eq!(err.code(), "route_not_found");

    let page = resolve(&resolver, "acme", "/fr/emplacements").await.page;
    assert_eq!(page.page_type_code, "sectores_listado");
    assert_eq!(page.title, "Sectores");
    assert!(page.is_virtual);
}

#[tokio::test]
async fn test_custom_route_alias_and_prefix() {
    let resolver = common::resolver(common::store());

    let resolved = resolve(&resolver, "acme", "/en/about-us").await;
    let page = &resolved.page;
    assert_eq!(page.page_type_code, "pagina_personalizada");
    assert_eq!(page.custom_route_id.as_deref(), Some("cr-nosotros"));
    assert_eq!(page.page_id.as_deref(), Some("page-nosotros"));
    assert_eq!(page.title, "About us");
    assert!(!page.is_virtual);
    assert_eq!(
        component_ids(&resolved),
        vec!["ci-header", "ci-about-text", "ci-whatsapp", "ci-footer"]
    );

    let page = resolve(&resolver, "acme", "/nosotros").await.page;
    assert_eq!(page.title, "Nosotros");
}

#[tokio::test]
async fn test_system_route_shadows_custom_route() {
    let resolver = common::resolver(common::store());
    let page = resolve(&resolver, "acme", "/propiedades").await.page;
    assert_eq!(page.page_type_code, "propiedades_listado");
    assert_eq!(page.custom_route_id, None);

    let report = resolver.site("acme").await.unwrap().report();
    assert_eq!(report.shadowed.len(), 1);
    assert_eq!(report.shadowed[0].custom_route_id.as_deref(), Some("cr-propiedades"));
}

#[tokio::test]
async fn test_configuration_conflicts_do_not_break_the_page() {
    let resolver = common::resolver(common::store());
    let resolved = resolve(&resolver, "acme", "/").await;

    let ids = component_ids(&resolved);
    assert!(!ids.contains(&"ci-both-scopes"));
    assert!(!ids.contains(&"ci-unscoped-hero"));
    assert!(!ids.contains(&"ci-hero-draft"));
}

#[tokio::test]
async fn test_ambiguous_custom_routes() {
    let resolver = common::resolver(common::store());

    let err = resolve_err(&resolver, "beta", "/blog").await;
    match err {
        ResolveError::AmbiguousRoute { segment, prefixes, .. } => {
            assert_eq!(segment, "blog");
            assert_eq!(prefixes.len(), 2);
        }
        other => panic!("unexpected error {:?}", other),
    }

    // The rest of the tenant keeps resolving.
    let page = resolve(&resolver, "beta", "/").await.page;
    assert_eq!(page.page_id.as_deref(), Some("page-beta-home"));

    let report = resolver.site("beta").await.unwrap().report();
    assert_eq!(report.conflicts.len(), 1);
}

#[tokio::test]
async fn test_missing_unique_page_is_entity_not_found() {
    let resolver = common::resolver(common::store());
    let err = resolve_err(&resolver, "beta", "/contacto").await;
    match err {
        ResolveError::EntityNotFound { table, .. } => assert_eq!(table, "pages"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_path_normalization() {
    let resolver = common::resolver(common::store());
    let expected = resolve(&resolver, "acme", "/en/locations/santo-domingo").await;

    for raw in [
        "//en//locations///santo-domingo/",
        "/EN/locations/santo-domingo",
        "/en/locations/santo-domingo?utm_source=mail",
    ] {
        assert_eq!(resolve(&resolver, "acme", raw).await, expected, "{}", raw);
    }
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let resolver = common::resolver(common::store());
    for path in ["/", "/en/locations/santo-domingo", "/testimonios/vendedores/juan-rafael"] {
        let first = resolve(&resolver, "acme", path).await;
        let second = resolve(&resolver, "acme", path).await;
        assert_eq!(first, second, "{}", path);
    }
}

#[tokio::test]
async fn test_reload_requires_version_bump() {
    let store = common::store();
    let resolver = common::resolver(store.clone());
    resolve(&resolver, "acme", "/").await;

    let mut data = common::site_data();
    let acme = data.tenants.iter_mut().find(|t| t.id == "acme").unwrap();
    acme.custom_routes[0].aliases.insert("en".into(), "who-we-are".into());
    store.replace(data);

    // Compiled route tables stay until invalidated.
    assert_eq!(resolve_err(&resolver, "acme", "/en/who-we-are").await.code(), "route_not_found");

    resolver.cache().invalidate_tenant("acme");
    let page = resolve(&resolver, "acme", "/en/who-we-are").await.page;
    assert_eq!(page.custom_route_id.as_deref(), Some("cr-nosotros"));
}

#[tokio::test]
async fn test_concurrent_resolutions() {
    let resolver = common::resolver(common::store());
    let mut handles = Vec::new();
    for i in 0..32 {
        let resolver = resolver.clone();
        handles.push(tokio::spawn(async move {
            let path = if i % 2 == 0 { "/" } else { "/en/locations/santo-domingo" };
            resolver.resolve("acme", path, &BTreeMap::new()).await.is_ok()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }
}
