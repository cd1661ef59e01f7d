//! Compiled per-tenant site state.
//!
//! Everything the request path needs that only changes on an admin edit or a
//! data reload: tenant languages, the effective route table, the handler
//! registry and the component catalog.

use crate::components::ComponentCatalog;
use crate::error::{ResolveError, ResolveResult};
use crate::model::TenantSite;
use crate::observability::metrics;
use crate::page::HandlerRegistry;
use crate::resolver::types::{RejectedRoute, RouteReport};
use crate::routing::RouteTable;
use crate::store::{CacheVersion, DataContext};

pub struct SiteSnapshot {
    pub site: TenantSite,
    pub routes: RouteTable,
    pub registry: HandlerRegistry,
    pub catalog: ComponentCatalog,
    pub rejected: Vec<RejectedRoute>,
    pub version: CacheVersion,
}

impl SiteSnapshot {
    /// Load and compile a tenant's site from the stores.
    ///
    /// Shared catalog problems fail the whole tenant with `InvalidCatalog`; a
    /// bad custom route is only excluded.
    pub async fn load(
        ctx: &DataContext,
        tenant_id: &str,
        version: CacheVersion,
    ) -> ResolveResult<Self> {
        let mut site = ctx
            .routes
            .tenant_site(tenant_id)
            .await?
            .ok_or_else(|| ResolveError::TenantNotFound(tenant_id.to_string()))?;

        let (page_types, system_routes, entries, bindings) = tokio::try_join!(
            ctx.catalog.page_types(),
            ctx.catalog.system_routes(),
            ctx.catalog.catalog_entries(),
            ctx.catalog.template_bindings(),
        )?;

        let registry = HandlerRegistry::build(&page_types)
            .map_err(|e| ResolveError::InvalidCatalog(e.to_string()))?;

        for route in system_routes.iter().filter(|route| route.enabled) {
            registry
                .check_route(route)
                .map_err(|e| ResolveError::InvalidCatalog(e.to_string()))?;
        }

        let mut rejected = Vec::new();
        site.custom_routes.retain(|route| {
            let check = if route.is_root() {
                Err("custom routes cannot claim the site root".to_string())
            } else {
                registry.check_route(route).map_err(|e| e.to_string())
            };
            match check {
                Ok(()) => true,
                Err(reason) => {
                    tracing::warn!(
                        tenant = %tenant_id,
                        prefix = %route.prefix,
                        custom_route_id = ?route.custom_route_id,
                        reason = %reason,
                        "Excluding invalid custom route"
                    );
                    metrics::record_config_conflict("invalid_custom_route");
                    rejected.push(RejectedRoute {
                        prefix: route.prefix.clone(),
                        custom_route_id: route.custom_route_id.clone(),
                        reason,
                    });
                    false
                }
            }
        });

        let routes = RouteTable::build(system_routes, &site);
        let catalog = ComponentCatalog::build(entries, bindings)?;

        tracing::debug!(
            tenant = %tenant_id,
            routes = routes.len(),
            conflicts = routes.conflicts().len(),
            page_types = registry.len(),
            components = catalog.len(),
            "Site snapshot compiled"
        );

        Ok(Self {
            site,
            routes,
            registry,
            catalog,
            rejected,
            version,
        })
    }

    pub fn report(&self) -> RouteReport {
        RouteReport {
            tenant: self.site.id.clone(),
            default_language: self.site.default_language.clone(),
            languages: self.site.languages.clone(),
            version: self.version,
            routes: self.routes.iter().map(|route| route.as_ref().clone()).collect(),
            conflicts: self.routes.conflicts().to_vec(),
            shadowed: self.routes.shadowed().to_vec(),
            rejected: self.rejected.clone(),
        }
    }
}
