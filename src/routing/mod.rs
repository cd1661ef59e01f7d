//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Raw path (tenant languages known)
//!     → normalizer.rs (language prefix → (language, cleanPath))
//!     → router.rs (first segment → RouteMatch, via matcher.rs passes)
//!     → segments.rs (remaining segments → directory / category / single)
//!
//! Route Table compilation (per tenant, cached):
//!     system RouteDefinition[] + tenant alias overrides
//!     ∪ enabled custom RouteDefinition[]
//!     → table.rs (shadowing, conflict detection)
//!     → immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Tables compiled once per cache version, immutable at request time
//! - No regex: exact segment comparison only
//! - Deterministic: same input always matches same route
//! - First match wins: system alias, system prefix, custom alias, custom prefix

pub mod matcher;
pub mod normalizer;
pub mod router;
pub mod segments;
pub mod table;

pub use normalizer::{normalize_path, NormalizedPath};
pub use router::{classify, RouteMatch};
pub use segments::{resolve_segments, PageTarget, SegmentResolution};
pub use table::{RouteConflict, RouteTable, ShadowedRoute};
