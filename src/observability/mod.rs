//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router and HTTP layer produce:
//!     → logging.rs (structured log events, request_log middleware)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the HTTP layer into handler logs
//! - Metrics are cheap (no-ops until an exporter is installed)

pub mod logging;
pub mod metrics;
