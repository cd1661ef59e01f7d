//! Resolution pipeline entry point.
//!
//! # Data Flow
//! ```text
//! resolve(tenant, path, query)
//!     → SiteCache<SiteSnapshot> (hit, or snapshot.rs loads from DataContext)
//!     → routing::normalize_path → routing::classify → routing::resolve_segments
//!     → page::PageAssembler (content::EntityLocator)
//!     → components::ComponentComposer → components::bind_dynamic_data
//!     → ResolvedPageWithComponents | ResolveError
//! ```

pub mod engine;
pub mod snapshot;
pub mod types;

pub use engine::Resolver;
pub use snapshot::SiteSnapshot;
pub use types::{RejectedRoute, ResolvedPageWithComponents, RouteReport};
