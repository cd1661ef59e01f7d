//! Domain model shared by every resolution stage.
//!
//! # Data Flow
//! ```text
//! Administrator-authored (shared, long-lived):
//!     PageTypeDescriptor, RouteDefinition (system), ComponentCatalogEntry,
//!     ComponentTemplateBinding
//!
//! Tenant-authored:
//!     TenantSite (languages, alias overrides, custom routes),
//!     ComponentInstanceRow → ComponentInstance (scope checked on conversion)
//!
//! Per request (never persisted):
//!     ResolvedPage, ComposedComponent
//! ```
//!
//! # Design Decisions
//! - Storage rows keep the nullable column pair; in-memory instances carry `Scope`
//! - Component configuration is typed by section, not an opaque JSON blob
//! - Everything the renderer consumes is `Serialize`

pub mod component;
pub mod content;
pub mod page;
pub mod route;
pub mod tenant;

pub use component::{
    CatalogRef, ComponentCatalogEntry, ComponentConfig, ComponentInstance, ComponentInstanceRow,
    ComponentTemplateBinding, ComposedComponent, DataBinding, DynamicData, Scope, ScopeConflict,
    Slot, VariantSchema,
};
pub use content::{ContentRecord, PageRecord, PageRef};
pub use page::{HandlerSpec, PageTypeDescriptor, ResolvedPage};
pub use route::{NavigationLevel, RouteDefinition, RoutePages, SourceKind, TargetKind};
pub use tenant::TenantSite;
