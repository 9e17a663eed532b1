//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handler + outbound client produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → optional Prometheus scrape endpoint
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every request span
//! - Metrics are cheap and off unless the exporter is enabled

pub mod logging;
pub mod metrics;
