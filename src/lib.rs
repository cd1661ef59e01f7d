//! Multi-tenant page resolution engine.
//!
//! Resolves a `(tenant, path)` pair into the page template that applies, the
//! content entity the path addresses and the ordered, merged component list
//! needed to render it.
//!
//! # Architecture Overview
//!
//! ```text
//!   GET /resolve/{tenant}?path=...
//!        │
//!        ▼
//!   ┌─────────┐   ┌──────────────────────────────────────────────────────────┐
//!   │  http   │──▶│ resolver                                                 │
//!   │ server  │   │  SiteCache<SiteSnapshot> ◀── store (DataContext traits)  │
//!   └─────────┘   │        │                                                 │
//!        ▲        │        ▼                                                 │
//!        │        │  routing: normalize → classify → segments               │
//!        │        │        │                                                 │
//!        │        │        ▼                                                 │
//!        │        │  page: registry + assembler ──▶ content: locator         │
//!        │        │        │                                                 │
//!        │        │        ▼                                                 │
//!        │        │  components: composer (merge) → binder                   │
//!        │        └────────┬─────────────────────────────────────────────────┘
//!        └─────────────────┘  ResolvedPageWithComponents | ResolveError
//!
//!   Cross-cutting: config (+ watcher), observability, lifecycle, admin
//! ```

// Domain
pub mod components;
pub mod content;
pub mod error;
pub mod model;
pub mod page;
pub mod resolver;
pub mod routing;
pub mod store;

// Service
pub mod admin;
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ResolverConfig;
pub use error::{ResolveError, ResolveResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resolver::{ResolvedPageWithComponents, Resolver};
pub use store::{DataContext, MemoryStore, SiteData};
