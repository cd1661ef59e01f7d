//! Page subsystem.
//!
//! # Data Flow
//! ```text
//! PageTypeDescriptor[] (catalog)
//!     → registry.rs (code → PageHandler, built once per snapshot)
//!
//! RouteMatch + SegmentResolution + language
//!     → assembler.rs
//!         unique handler  → persisted page row (is_virtual = false)
//!         other handlers  → virtual descriptor (entity / category lookups)
//!     → ResolvedPage
//! ```

pub mod assembler;
pub mod registry;

pub use assembler::PageAssembler;
pub use registry::{HandlerRegistry, PageHandler, RegisteredPage, RegistryError};
