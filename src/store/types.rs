//! Store trait, persisted report envelope and errors.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::audit::DeviationReport;
use crate::template::Augmentation;

/// Errors raised by artifact stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("report {id} is not valid JSON: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} {id} not found for device {device}")]
    NotFound {
        device: String,
        kind: &'static str,
        id: String,
    },
}

/// A deviation report as persisted for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReport {
    pub device: String,
    /// `YYYY-MM-DD_HHMM` stamp of this report.
    pub generated_at: String,
    /// Identifier of the snapshot the report was computed from.
    pub snapshot: String,
    pub augmentation: Augmentation,
    pub report: DeviationReport,
}

/// Where snapshots are read from and reports are written to.
pub trait ArtifactStore: Send + Sync {
    /// Identifiers of every saved configuration snapshot of a device.
    fn snapshot_ids(&self, device: &str) -> Result<Vec<String>, StoreError>;

    /// Raw lines of one snapshot.
    fn load_snapshot(&self, device: &str, id: &str) -> Result<Vec<String>, StoreError>;

    /// Identifiers of every stored deviation report of a device.
    fn report_ids(&self, device: &str) -> Result<Vec<String>, StoreError>;

    fn load_report(&self, device: &str, id: &str) -> Result<StoredReport, StoreError>;

    /// Persist a report and return its identifier.
    fn save_report(&self, report: &StoredReport) -> Result<String, StoreError>;

    /// Remove every stored report of a device, returning how many were removed.
    fn discard_reports(&self, device: &str) -> Result<usize, StoreError>;
}

/// Identifier used for a report generated at `stamp`.
pub fn report_id(device: &str, stamp: &str) -> String {
    format!("{}_deviation_{}.json", device, stamp)
}
