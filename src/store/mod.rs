//! Read-only collaborator interfaces.
//!
//! # Data Flow
//! ```text
//! Resolver
//!     → DataContext (explicit, injected)
//!         → RouteConfigStore  (tenant languages, aliases, custom routes)
//!         → CatalogStore      (page types, system routes, catalog, templates, instances)
//!         → ContentStore      (slug lookups, persisted unique pages)
//!     → cache.rs (per-tenant compiled site, version-invalidated)
//! ```
//!
//! # Design Decisions
//! - No module-level connection singleton; every stage receives its store
//! - The engine never writes through these traits
//! - `memory.rs` backs the service and the tests; other backends plug in behind the traits

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{
    ComponentCatalogEntry, ComponentInstanceRow, ComponentTemplateBinding, ContentRecord,
    PageRecord, PageRef, PageTypeDescriptor, RouteDefinition, TenantSite,
};

pub mod cache;
pub mod memory;

pub use cache::{CacheStats, CacheVersion, SiteCache};
pub use memory::{MemoryStore, SiteData, StoredPage, TenantData};

/// Collaborator failure, distinct from the resolution taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Tenant route configuration.
#[async_trait]
pub trait RouteConfigStore: Send + Sync {
    /// Returns `None` for an unknown tenant.
    async fn tenant_site(&self, tenant_id: &str) -> StoreResult<Option<TenantSite>>;
}

/// Administrator-managed catalog plus tenant component instances.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn page_types(&self) -> StoreResult<Vec<PageTypeDescriptor>>;

    async fn system_routes(&self) -> StoreResult<Vec<RouteDefinition>>;

    async fn catalog_entries(&self) -> StoreResult<Vec<ComponentCatalogEntry>>;

    async fn template_bindings(&self) -> StoreResult<Vec<ComponentTemplateBinding>>;

    /// Raw instance rows for a tenant; scope validity is checked by the composer.
    async fn component_instances(&self, tenant_id: &str) -> StoreResult<Vec<ComponentInstanceRow>>;
}

/// Content lookups keyed by tenant, table and slug.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Row whose canonical slug equals `slug`.
    async fn find_by_slug(
        &self,
        tenant_id: &str,
        table: &str,
        slug: &str,
    ) -> StoreResult<Option<ContentRecord>>;

    /// Row whose translated slug for `language` equals `slug`.
    async fn find_by_translated_slug(
        &self,
        tenant_id: &str,
        table: &str,
        language: &str,
        slug: &str,
    ) -> StoreResult<Option<ContentRecord>>;

    async fn unique_page(&self, tenant_id: &str, page: &PageRef) -> StoreResult<Option<PageRecord>>;
}

/// Data-access context passed explicitly into every resolution stage.
#[derive(Clone)]
pub struct DataContext {
    pub routes: Arc<dyn RouteConfigStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub content: Arc<dyn ContentStore>,
}

impl DataContext {
    /// Build a context where one store serves all three roles.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: RouteConfigStore + CatalogStore + ContentStore + 'static,
    {
        Self {
            routes: store.clone(),
            catalog: store.clone(),
            content: store,
        }
    }
}
