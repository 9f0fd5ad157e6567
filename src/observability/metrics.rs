//! Metrics collection and exposition.
//!
//! # Metrics
//! - `audit_scans_total` (counter): scans by outcome and status
//! - `audit_deviation_lines_total` (counter): reported lines by kind (missing, extra)
//! - `audit_compile_failures_total` (counter): scans aborted by a template compile error
//!
//! # Design Decisions
//! - Exporter is opt-in; without it the macros hit the no-op recorder
//! - Labels are static strings only

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::audit::AuditStatus;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one scan decision.
pub fn record_scan(outcome: &'static str, status: Option<AuditStatus>) {
    let status = status.map(|s| s.as_str()).unwrap_or("none");
    ::metrics::counter!("audit_scans_total", "outcome" => outcome, "status" => status).increment(1);
}

/// Record the size of a freshly generated report.
pub fn record_deviation_lines(missing: usize, extra: usize) {
    ::metrics::counter!("audit_deviation_lines_total", "kind" => "missing").increment(missing as u64);
    ::metrics::counter!("audit_deviation_lines_total", "kind" => "extra").increment(extra as u64);
}

/// Record a scan aborted by an undefined variable or invalid pattern.
pub fn record_compile_failure() {
    ::metrics::counter!("audit_compile_failures_total").increment(1);
}
