//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the auditor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::device::DEFAULT_ELS_MARKERS;

/// Root configuration for the auditor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuditConfig {
    /// Where templates, tables, snapshots and reports live.
    pub paths: PathsConfig,

    /// Template file names inside `paths.templates_dir`.
    pub templates: TemplateFiles,

    /// Model classification rules.
    pub classification: ClassificationConfig,

    /// Fleet runner settings.
    pub fleet: FleetConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Device inventory.
    pub devices: Vec<DeviceConfig>,
}

impl AuditConfig {
    /// Look up a device by name.
    pub fn device(&self, name: &str) -> Option<&DeviceConfig> {
        self.devices.iter().find(|d| d.name == name)
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the template files.
    pub templates_dir: PathBuf,

    /// Per-device snapshot directories live under here.
    pub snapshots_dir: PathBuf,

    /// Per-device report directories live under here.
    pub reports_dir: PathBuf,

    /// CSV table: term,regex.
    pub terms_table: PathBuf,

    /// CSV table: variable,term.
    pub variables_table: PathBuf,
}

impl PathsConfig {
    /// Anchor relative paths at `base` (the config file's directory).
    pub fn resolve_relative(&mut self, base: &Path) {
        for path in [
            &mut self.templates_dir,
            &mut self.snapshots_dir,
            &mut self.reports_dir,
            &mut self.terms_table,
            &mut self.variables_table,
        ] {
            if path.is_relative() && !path.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            snapshots_dir: PathBuf::from("snapshots"),
            reports_dir: PathBuf::from("reports"),
            terms_table: PathBuf::from("templates/terms.csv"),
            variables_table: PathBuf::from("templates/variables.csv"),
        }
    }
}

/// Template file names.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateFiles {
    /// Lines every device must carry.
    pub baseline: String,

    /// Augmentation for ELS models.
    pub els: String,

    /// Augmentation for non-ELS models.
    pub non_els: String,

    /// Augmentation for routing points (replaces the family augmentation).
    pub routing: String,

    /// Lines that are allowed but not required.
    pub optional: String,
}

impl Default for TemplateFiles {
    fn default() -> Self {
        Self {
            baseline: "baseline.conf".to_string(),
            els: "els.conf".to_string(),
            non_els: "non-els.conf".to_string(),
            routing: "routing.conf".to_string(),
            optional: "optional.conf".to_string(),
        }
    }
}

/// Model classification rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Model substrings identifying ELS hardware (case-insensitive).
    pub els_markers: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            els_markers: DEFAULT_ELS_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Fleet runner settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Maximum devices scanned at the same time.
    pub max_concurrent_scans: usize,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            max_concurrent_scans: 8,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// One inventory entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Unique device name; also the per-device directory name.
    pub name: String,

    /// Hardware model string (e.g. "EX4300-48T").
    #[serde(default)]
    pub model: String,
}
