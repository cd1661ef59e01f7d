//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID set, propagated, logged)
//!     → /resolve/{tenant} → Resolver::resolve
//!     → response.rs (ResolveError → status + JSON error body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuid, X_REQUEST_ID};
pub use response::ErrorBody;
pub use server::{AppState, HttpServer};
