//! Component composition subsystem.
//!
//! # Data Flow
//! ```text
//! ComponentCatalogEntry[] + ComponentTemplateBinding[]
//!     → catalog.rs (indexed by type/variant, built once per snapshot)
//!
//! ComponentInstanceRow[] (tenant) + resolved page type / custom route
//!     → composer.rs
//!         scope check (row → Scope), activation filter, catalog lookup
//!         → merge.rs (catalog defaults → template defaults → instance override)
//!         → sentinel orders for global header/footer, stable sort
//!     → binder.rs (dynamic_data ← entity, category, language, query)
//!     → ComposedComponent[]
//! ```
//!
//! # Design Decisions
//! - A bad instance is skipped with a `ConfigurationConflict`; the page still renders
//! - Merging is a key union: no layer can drop a key set by a lower layer

pub mod binder;
pub mod catalog;
pub mod composer;
pub mod merge;

pub use binder::bind_dynamic_data;
pub use catalog::ComponentCatalog;
pub use composer::{
    ComponentComposer, Composition, ConfigurationConflict, FOOTER_ORDER, HEADER_ORDER,
};
pub use merge::{deep_merge, merge_config};
