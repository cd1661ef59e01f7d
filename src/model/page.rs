//! Page-type descriptors and the resolved page descriptor.

use serde::{Deserialize, Serialize};

use crate::model::route::NavigationLevel;

/// One system page template (e.g. `homepage`, `propiedades_single`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTypeDescriptor {
    pub code: String,

    /// Display name used as the title of virtual listing pages.
    #[serde(default)]
    pub name: String,

    /// Documentation pattern, e.g. `/propiedades/:slug`.
    pub route_pattern: String,

    pub navigation_level: NavigationLevel,

    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default = "default_true")]
    pub public: bool,

    /// Data strategy used to assemble pages of this type.
    pub handler: HandlerSpec,
}

fn default_true() -> bool {
    true
}

impl PageTypeDescriptor {
    /// Display name, falling back to the code.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.code
        } else {
            &self.name
        }
    }
}

/// Declarative data strategy for a page type, as authored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandlerSpec {
    /// A persisted page row (home, contact, custom static pages).
    Unique,
    /// A virtual listing over a content table.
    Listing {
        #[serde(default)]
        table: Option<String>,
    },
    /// A virtual listing filtered by a category row.
    Category { category_table: String },
    /// A single content row, optionally beneath a category.
    Single {
        table: String,
        #[serde(default)]
        category_table: Option<String>,
        #[serde(default = "default_true")]
        language_fallback: bool,
    },
}

/// Page descriptor handed to the renderer.
///
/// Virtual pages are never persisted; their identity is derived from the
/// resolved slug and category on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPage {
    pub page_type_code: String,
    pub title: String,
    pub slug: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    pub is_virtual: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_route_id: Option<String>,
    /// Id of the persisted page row, for non-virtual pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}
