//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! service config (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ResolverConfig (validated, immutable)
//!
//! site data document (TOML)
//!     → loader.rs (parse)
//!     → validation.rs (referential checks)
//!     → SiteData → MemoryStore
//!
//! On change:
//!     watcher.rs detects change
//!     → loader.rs loads new site data
//!     → validation.rs validates
//!     → atomic swap in MemoryStore + global cache version bump
//! ```
//!
//! # Design Decisions
//! - Service config is immutable once loaded; site data is hot-reloadable
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::AdminConfig;
pub use schema::CacheConfig;
pub use schema::DataConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ResolverConfig;
pub use schema::TimeoutConfig;
