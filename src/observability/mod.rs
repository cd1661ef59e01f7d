//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON when configured)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (tenant, path, page_type) on every resolution event
//! - Request ID flows in from the HTTP layer
//! - Metric updates are cheap; recording without an installed exporter is a no-op

pub mod logging;
pub mod metrics;
