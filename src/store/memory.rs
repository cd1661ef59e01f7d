//! In-memory store backed by a site data document.
//!
//! The document is loaded from TOML (see `config::loader::load_site_data`) and
//! swapped atomically on reload; readers always see one consistent snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{
    ComponentCatalogEntry, ComponentInstanceRow, ComponentTemplateBinding, ContentRecord,
    PageRecord, PageRef, PageTypeDescriptor, RouteDefinition, SourceKind, TenantSite,
};
use crate::store::{CatalogStore, ContentStore, RouteConfigStore, StoreResult};

/// Root of the site data document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteData {
    pub page_types: Vec<PageTypeDescriptor>,

    /// System route definitions.
    pub routes: Vec<RouteDefinition>,

    /// Component catalog.
    pub components: Vec<ComponentCatalogEntry>,

    /// Template bindings.
    pub templates: Vec<ComponentTemplateBinding>,

    pub tenants: Vec<TenantData>,
}

impl SiteData {
    pub fn tenant(&self, tenant_id: &str) -> Option<&TenantData> {
        self.tenants.iter().find(|t| t.id == tenant_id)
    }
}

/// Everything one tenant owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantData {
    pub id: String,

    pub default_language: String,

    #[serde(default)]
    pub languages: Vec<String>,

    #[serde(default)]
    pub route_aliases: BTreeMap<String, BTreeMap<String, String>>,

    #[serde(default)]
    pub custom_routes: Vec<RouteDefinition>,

    #[serde(default)]
    pub instances: Vec<ComponentInstanceRow>,

    /// Content rows by table name.
    #[serde(default)]
    pub content: BTreeMap<String, Vec<ContentRecord>>,

    #[serde(default)]
    pub pages: Vec<StoredPage>,
}

impl TenantData {
    /// Route configuration view; custom routes are always tagged as custom.
    pub fn site(&self) -> TenantSite {
        TenantSite {
            id: self.id.clone(),
            default_language: self.default_language.clone(),
            languages: self.languages.clone(),
            route_aliases: self.route_aliases.clone(),
            custom_routes: self
                .custom_routes
                .iter()
                .cloned()
                .map(|mut route| {
                    route.source = SourceKind::Custom;
                    route
                })
                .collect(),
        }
    }

    fn table(&self, table: &str) -> &[ContentRecord] {
        self.content.get(table).map(Vec::as_slice).unwrap_or_default()
    }
}

/// A persisted unique page keyed by page type or custom route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPage {
    #[serde(default)]
    pub page_type_code: Option<String>,

    #[serde(default)]
    pub custom_route_id: Option<String>,

    #[serde(flatten)]
    pub record: PageRecord,
}

impl StoredPage {
    fn matches(&self, page: &PageRef) -> bool {
        match page {
            PageRef::PageType(code) => {
                self.custom_route_id.is_none() && self.page_type_code.as_deref() == Some(code.as_str())
            }
            PageRef::CustomRoute(id) => self.custom_route_id.as_deref() == Some(id.as_str()),
        }
    }
}

/// Thread-safe store serving a swappable `SiteData` snapshot.
#[derive(Debug)]
pub struct MemoryStore {
    data: ArcSwap<SiteData>,
}

impl MemoryStore {
    pub fn new(data: SiteData) -> Self {
        Self {
            data: ArcSwap::from_pointee(data),
        }
    }

    /// Atomically replace the whole document.
    pub fn replace(&self, data: SiteData) {
        self.data.store(Arc::new(data));
    }

    pub fn snapshot(&self) -> Arc<SiteData> {
        self.data.load_full()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(SiteData::default())
    }
}

#[async_trait]
impl RouteConfigStore for MemoryStore {
    async fn tenant_site(&self, tenant_id: &str) -> StoreResult<Option<TenantSite>> {
        Ok(self.data.load().tenant(tenant_id).map(TenantData::site))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn page_types(&self) -> StoreResult<Vec<PageTypeDescriptor>> {
        Ok(self.data.load().page_types.clone())
    }

    async fn system_routes(&self) -> StoreResult<Vec<RouteDefinition>> {
        Ok(self
            .data
            .load()
            .routes
            .iter()
            .cloned()
            .map(|mut route| {
                route.source = SourceKind::System;
                route.custom_route_id = None;
                route
            })
            .collect())
    }

    async fn catalog_entries(&self) -> StoreResult<Vec<ComponentCatalogEntry>> {
        Ok(self.data.load().components.clone())
    }

    async fn template_bindings(&self) -> StoreResult<Vec<ComponentTemplateBinding>> {
        Ok(self.data.load().templates.clone())
    }

    async fn component_instances(&self, tenant_id: &str) -> StoreResult<Vec<ComponentInstanceRow>> {
        let data = self.data.load();
        let Some(tenant) = data.tenant(tenant_id) else {
            return Ok(Vec::new());
        };

        Ok(tenant
            .instances
            .iter()
            .cloned()
            .map(|mut row| {
                row.tenant_id = tenant.id.clone();
                row
            })
            .collect())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find_by_slug(
        &self,
        tenant_id: &str,
        table: &str,
        slug: &str,
    ) -> StoreResult<Option<ContentRecord>> {
        let data = self.data.load();
        Ok(data
            .tenant(tenant_id)
            .and_then(|t| t.table(table).iter().find(|r| r.slug == slug))
            .cloned())
    }

    async fn find_by_translated_slug(
        &self,
        tenant_id: &str,
        table: &str,
        language: &str,
        slug: &str,
    ) -> StoreResult<Option<ContentRecord>> {
        let data = self.data.load();
        Ok(data
            .tenant(tenant_id)
            .and_then(|t| {
                t.table(table)
                    .iter()
                    .find(|r| r.translated_slug(language) == Some(slug))
            })
            .cloned())
    }

    async fn unique_page(&self, tenant_id: &str, page: &PageRef) -> StoreResult<Option<PageRecord>> {
        let data = self.data.load();
        Ok(data
            .tenant(tenant_id)
            .and_then(|t| t.pages.iter().find(|p| p.matches(page)))
            .map(|p| p.record.clone()))
    }
}
