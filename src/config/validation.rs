//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the inventory (unique, path-safe device names)
//! - Validate value ranges (concurrency > 0, metrics address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AuditConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::AuditConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("device #{0} has an empty name")]
    EmptyDeviceName(usize),

    #[error("device name {0:?} must not contain path separators or start with '.'")]
    UnsafeDeviceName(String),

    #[error("device {0:?} is listed more than once")]
    DuplicateDevice(String),

    #[error("fleet.max_concurrent_scans must be greater than 0")]
    ZeroConcurrency,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &AuditConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let paths = [
        ("paths.templates_dir", config.paths.templates_dir.as_os_str().is_empty()),
        ("paths.snapshots_dir", config.paths.snapshots_dir.as_os_str().is_empty()),
        ("paths.reports_dir", config.paths.reports_dir.as_os_str().is_empty()),
        ("paths.terms_table", config.paths.terms_table.as_os_str().is_empty()),
        ("paths.variables_table", config.paths.variables_table.as_os_str().is_empty()),
        ("templates.baseline", config.templates.baseline.trim().is_empty()),
        ("templates.els", config.templates.els.trim().is_empty()),
        ("templates.non_els", config.templates.non_els.trim().is_empty()),
        ("templates.routing", config.templates.routing.trim().is_empty()),
        ("templates.optional", config.templates.optional.trim().is_empty()),
    ];
    errors.extend(
        paths
            .into_iter()
            .filter(|(_, empty)| *empty)
            .map(|(field, _)| ValidationError::EmptyField(field)),
    );

    let mut seen = HashSet::new();
    for (idx, device) in config.devices.iter().enumerate() {
        let name = device.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyDeviceName(idx));
            continue;
        }
        if name.contains('/') || name.contains('\\') || name.starts_with('.') {
            errors.push(ValidationError::UnsafeDeviceName(device.name.clone()));
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateDevice(device.name.clone()));
        }
    }

    if config.fleet.max_concurrent_scans == 0 {
        errors.push(ValidationError::ZeroConcurrency);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
