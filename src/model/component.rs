//! Component catalog, template bindings, instances and typed configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reference to a catalog component: type plus variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub variant: String,
}

impl CatalogRef {
    pub fn new(kind: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            variant: variant.into(),
        }
    }
}

impl fmt::Display for CatalogRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.variant)
    }
}

/// Region of the page a component renders into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Header,
    #[default]
    Body,
    Footer,
}

/// Shape and defaults of one component variant, independent of any tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantSchema {
    /// Lowest configuration layer.
    pub defaults: ComponentConfig,

    /// Whether the variant fetches live content through `dynamic_data`.
    pub dynamic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCatalogEntry {
    #[serde(flatten)]
    pub component: CatalogRef,

    #[serde(default)]
    pub slot: Slot,

    /// May be instantiated tenant-wide (header, footer, floating widgets).
    #[serde(default)]
    pub global: bool,

    #[serde(default)]
    pub schema: VariantSchema,
}

/// What a page template includes by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTemplateBinding {
    #[serde(flatten)]
    pub component: CatalogRef,

    #[serde(default)]
    pub page_type_code: Option<String>,

    #[serde(default)]
    pub custom_route_id: Option<String>,

    #[serde(default)]
    pub order: i32,

    #[serde(default)]
    pub is_global: bool,

    #[serde(default)]
    pub default_data: ComponentConfig,
}

impl ComponentTemplateBinding {
    /// Whether this binding supplies template defaults for an instance scope.
    pub fn applies_to(&self, scope: &Scope) -> bool {
        match scope {
            Scope::Tenant => self.is_global,
            Scope::PageType(code) => self.page_type_code.as_deref() == Some(code.as_str()),
            Scope::CustomRoute(id) => self.custom_route_id.as_deref() == Some(id.as_str()),
        }
    }
}

/// Where a component instance applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Scope {
    /// Every page of the tenant.
    Tenant,
    PageType(String),
    CustomRoute(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Tenant => f.write_str("tenant"),
            Scope::PageType(code) => write!(f, "page_type:{}", code),
            Scope::CustomRoute(id) => write!(f, "custom_route:{}", id),
        }
    }
}

/// Component instance as stored: two nullable scope columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstanceRow {
    pub id: String,

    #[serde(default)]
    pub tenant_id: String,

    #[serde(flatten)]
    pub component: CatalogRef,

    #[serde(default)]
    pub page_type_code: Option<String>,

    #[serde(default)]
    pub custom_route_id: Option<String>,

    #[serde(default)]
    pub order: i32,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default)]
    pub config: ComponentConfig,
}

fn default_active() -> bool {
    true
}

/// A row naming both a page type and a custom route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("component instance {instance_id} is scoped to both page type {page_type_code} and custom route {custom_route_id}")]
pub struct ScopeConflict {
    pub instance_id: String,
    pub page_type_code: String,
    pub custom_route_id: String,
}

/// Component instance with a validated scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInstance {
    pub id: String,
    pub tenant_id: String,
    pub component: CatalogRef,
    pub scope: Scope,
    pub order: i32,
    pub active: bool,
    pub config: ComponentConfig,
}

impl TryFrom<ComponentInstanceRow> for ComponentInstance {
    type Error = ScopeConflict;

    fn try_from(row: ComponentInstanceRow) -> Result<Self, Self::Error> {
        let scope = match (row.page_type_code, row.custom_route_id) {
            (None, None) => Scope::Tenant,
            (Some(code), None) => Scope::PageType(code),
            (None, Some(id)) => Scope::CustomRoute(id),
            (Some(page_type_code), Some(custom_route_id)) => {
                return Err(ScopeConflict {
                    instance_id: row.id,
                    page_type_code,
                    custom_route_id,
                })
            }
        };

        Ok(Self {
            id: row.id,
            tenant_id: row.tenant_id,
            component: row.component,
            scope,
            order: row.order,
            active: row.active,
            config: row.config,
        })
    }
}

/// Typed component configuration.
///
/// Every layer (catalog defaults, template defaults, instance override) has
/// this shape; merging happens section by section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentConfig {
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub static_data: Map<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_data: Option<DynamicData>,

    #[serde(skip_serializing_if = "Map::is_empty")]
    pub styles: Map<String, Value>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub toggles: BTreeMap<String, bool>,
}

/// Declares that a component fetches live content.
///
/// Keys other than `dataType`, `params` and `binding` (`limit`, `filters`, ...)
/// are kept in `extra` and merged like every other section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicData {
    #[serde(rename = "dataType", alias = "data_type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,

    /// Routing context injected at request time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<DataBinding>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Values the renderer needs to fetch a component's live content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBinding {
    pub page_type_code: String,
    pub language: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,
}

/// One entry of the final, ordered component list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedComponent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub variant: String,
    /// Effective sort order; global header/footer carry sentinel values.
    pub order: i64,
    pub scope: Scope,
    pub merged_config: ComponentConfig,
}
