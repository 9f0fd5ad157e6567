//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! RefreshController / FleetRunner produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (scan, deviation and compile-failure counters)
//!
//! Consumers:
//!     → stderr (tracing fmt layer, RUST_LOG or config level)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - Structured fields (device, status, counts) instead of formatted text
//! - Metrics are cheap (atomic increments); recording without an
//!   installed recorder is a no-op

pub mod logging;
pub mod metrics;
