//! Resolution engine.
//!
//! # Responsibilities
//! - Serve compiled tenant snapshots from the version-invalidated cache
//! - Run the pipeline: normalize, classify, resolve segments, assemble, compose, bind
//! - Record one metric and one log event per resolution
//!
//! # Design Decisions
//! - Stateless per request; shared state is the cache and the injected stores
//! - Component instances are read per request, they are tenant-mutable

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::components::{bind_dynamic_data, ComponentComposer};
use crate::error::{ResolveError, ResolveResult};
use crate::observability::metrics;
use crate::page::PageAssembler;
use crate::resolver::snapshot::SiteSnapshot;
use crate::resolver::types::ResolvedPageWithComponents;
use crate::routing::{classify, normalize_path, resolve_segments};
use crate::store::{DataContext, SiteCache};

/// Page resolver shared by every request handler.
#[derive(Clone)]
pub struct Resolver {
    ctx: DataContext,
    cache: Arc<SiteCache<SiteSnapshot>>,
}

impl Resolver {
    pub fn new(ctx: DataContext, cache_enabled: bool) -> Self {
        Self {
            ctx,
            cache: Arc::new(SiteCache::new(cache_enabled)),
        }
    }

    pub fn cache(&self) -> &SiteCache<SiteSnapshot> {
        &self.cache
    }

    /// Compiled site for a tenant, from cache or freshly loaded.
    pub async fn site(&self, tenant_id: &str) -> ResolveResult<Arc<SiteSnapshot>> {
        if let Some(snapshot) = self.cache.get(tenant_id) {
            return Ok(snapshot);
        }

        let version = self.cache.current_version(tenant_id);
        let snapshot = Arc::new(SiteSnapshot::load(&self.ctx, tenant_id, version).await?);
        self.cache.insert(tenant_id, version, snapshot.clone());
        Ok(snapshot)
    }

    /// Resolve a tenant path into a page and its ordered components.
    pub async fn resolve(
        &self,
        tenant_id: &str,
        path: &str,
        query: &BTreeMap<String, String>,
    ) -> ResolveResult<ResolvedPageWithComponents> {
        let start = Instant::now();
        let result = self.resolve_inner(tenant_id, path, query).await;

        match &result {
            Ok(resolved) => {
                metrics::record_resolution("resolved", start);
                tracing::debug!(
                    tenant = %tenant_id,
                    path = %path,
                    page_type = %resolved.page.page_type_code,
                    components = resolved.components.len(),
                    "Path resolved"
                );
            }
            Err(e) => {
                metrics::record_resolution(e.code(), start);
                match e {
                    ResolveError::AmbiguousRoute { .. }
                    | ResolveError::InvalidCatalog(_)
                    | ResolveError::Store(_) => {
                        tracing::error!(tenant = %tenant_id, path = %path, error = %e, "Resolution failed")
                    }
                    _ => {
                        tracing::debug!(tenant = %tenant_id, path = %path, error = %e, "Resolution failed")
                    }
                }
            }
        }

        result
    }

    async fn resolve_inner(
        &self,
        tenant_id: &str,
        path: &str,
        query: &BTreeMap<String, String>,
    ) -> ResolveResult<ResolvedPageWithComponents> {
        let snapshot = self.site(tenant_id).await?;

        let normalized = normalize_path(path, &snapshot.site);
        let segments = normalized.segments();
        let (first, rest) = match segments.split_first() {
            Some((first, rest)) => (*first, rest),
            None => ("", &[][..]),
        };

        let route = classify(&snapshot.routes, first, &normalized.language).map_err(|e| match e {
            ResolveError::RouteNotFound { .. } => {
                ResolveError::route_not_found(normalized.clean_path.clone())
            }
            other => other,
        })?;
        let resolution = resolve_segments(&route, rest)?;

        // Private page types are not reachable through the public resolver.
        if snapshot
            .registry
            .get(&resolution.page_type_code)
            .is_some_and(|registered| !registered.descriptor.public)
        {
            tracing::debug!(
                tenant = %tenant_id,
                page_type = %resolution.page_type_code,
                "Page type is not public"
            );
            return Err(ResolveError::route_not_found(normalized.clean_path.clone()));
        }

        let page = PageAssembler::new(self.ctx.content.as_ref(), &snapshot.registry, &snapshot.site)
            .assemble(&route, &resolution, &normalized.language)
            .await?;

        let instances = self.ctx.catalog.component_instances(tenant_id).await?;
        let mut composition = ComponentComposer::new(&snapshot.catalog, tenant_id).compose(
            &instances,
            &page.page_type_code,
            page.custom_route_id.as_deref(),
        );
        bind_dynamic_data(&mut composition.components, &page, query);

        Ok(ResolvedPageWithComponents {
            page,
            components: composition.components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SiteData};

    const SITE: &str = r#"
        [[page_types]]
        code = "homepage"
        route_pattern = "/"
        navigation_level = 0
        handler = { kind = "unique" }

        [[routes]]
        prefix = ""
        navigation_level = 0
        pages = { directory = "homepage" }

        [[page_types]]
        code = "borrador"
        route_pattern = "/borrador"
        navigation_level = 0
        public = false
        handler = { kind = "unique" }

        [[routes]]
        prefix = "borrador"
        navigation_level = 0
        pages = { directory = "borrador" }

        [[components]]
        type = "header"
        variant = "classic"
        slot = "header"
        global = true

        [[tenants]]
        id = "acme"
        default_language = "es"

        [[tenants.instances]]
        id = "ci-header"
        type = "header"
        variant = "classic"

        [[tenants.pages]]
        page_type_code = "homepage"
        id = "page-home"
        title = "Inicio"

        [[tenants.pages]]
        page_type_code = "borrador"
        id = "page-draft"
        title = "Borrador"
    "#;

    fn resolver() -> (Arc<MemoryStore>, Resolver) {
        let data: SiteData = toml::from_str(SITE).unwrap();
        let store = Arc::new(MemoryStore::new(data));
        let resolver = Resolver::new(DataContext::from_store(store.clone()), true);
        (store, resolver)
    }

    #[tokio::test]
    async fn test_resolve_root() {
        let (_, resolver) = resolver();
        let resolved = resolver.resolve("acme", "/", &BTreeMap::new()).await.unwrap();
        assert_eq!(resolved.page.page_type_code, "homepage");
        assert_eq!(resolved.components.len(), 1);
        assert_eq!(resolved.components[0].id, "ci-header");
    }

    #[tokio::test]
    async fn test_private_page_type_is_not_routable() {
        let (_, resolver) = resolver();
        let err = resolver
            .resolve("acme", "/borrador", &BTreeMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::RouteNotFound { .. }), "{:?}", err);
    }

    #[tokio::test]
    async fn test_unknown_tenant() {
        let (_, resolver) = resolver();
        let err = resolver.resolve("nobody", "/", &BTreeMap::new()).await.unwrap_err();
        assert!(matches!(err, ResolveError::TenantNotFound(_)));
    }

    #[tokio::test]
    async fn test_cache_reuses_snapshot_until_invalidated() {
        let (store, resolver) = resolver();
        let first = resolver.site("acme").await.unwrap();
        let second = resolver.site("acme").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let mut data = (*store.snapshot()).clone();
        data.tenants[0].languages.push("en".into());
        store.replace(data);

        // Still the old snapshot: nothing bumped the version.
        assert!(resolver.site("acme").await.unwrap().site.languages.is_empty());

        resolver.cache().invalidate_tenant("acme");
        let fresh = resolver.site("acme").await.unwrap();
        assert_eq!(fresh.site.languages, vec!["en".to_string()]);
        assert_eq!(fresh.version.tenant, 1);
    }
}
