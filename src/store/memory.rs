//! In-process artifact store.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::store::types::{report_id, ArtifactStore, StoreError, StoredReport};

#[derive(Debug, Default)]
struct DeviceArtifacts {
    snapshots: BTreeMap<String, Vec<String>>,
    reports: BTreeMap<String, StoredReport>,
}

/// Thread-safe store keeping snapshots and reports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, DeviceArtifacts>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a configuration snapshot for a device.
    pub fn add_snapshot<S: AsRef<str>>(&self, device: &str, id: &str, lines: &[S]) {
        self.inner
            .entry(device.to_string())
            .or_default()
            .snapshots
            .insert(id.to_string(), lines.iter().map(|l| l.as_ref().to_string()).collect());
    }
}

impl ArtifactStore for MemoryStore {
    fn snapshot_ids(&self, device: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .inner
            .get(device)
            .map(|d| d.snapshots.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn load_snapshot(&self, device: &str, id: &str) -> Result<Vec<String>, StoreError> {
        self.inner
            .get(device)
            .and_then(|d| d.snapshots.get(id).cloned())
            .ok_or_else(|| StoreError::NotFound {
                device: device.to_string(),
                kind: "snapshot",
                id: id.to_string(),
            })
    }

    fn report_ids(&self, device: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .inner
            .get(device)
            .map(|d| d.reports.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn load_report(&self, device: &str, id: &str) -> Result<StoredReport, StoreError> {
        self.inner
            .get(device)
            .and_then(|d| d.reports.get(id).cloned())
            .ok_or_else(|| StoreError::NotFound {
                device: device.to_string(),
                kind: "report",
                id: id.to_string(),
            })
    }

    fn save_report(&self, report: &StoredReport) -> Result<String, StoreError> {
        let id = report_id(&report.device, &report.generated_at);
        self.inner
            .entry(report.device.clone())
            .or_default()
            .reports
            .insert(id.clone(), report.clone());
        Ok(id)
    }

    fn discard_reports(&self, device: &str) -> Result<usize, StoreError> {
        Ok(self
            .inner
            .get_mut(device)
            .map(|mut d| std::mem::take(&mut d.reports).len())
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::DeviationReport;
    use crate::template::Augmentation;

    #[test]
    fn test_snapshots_and_reports() {
        let store = MemoryStore::new();
        store.add_snapshot("sw1", "2024-01-01_0000", &["set system services ssh"]);

        assert_eq!(store.snapshot_ids("sw1").unwrap(), vec!["2024-01-01_0000"]);
        assert_eq!(store.load_snapshot("sw1", "2024-01-01_0000").unwrap().len(), 1);
        assert!(store.snapshot_ids("sw2").unwrap().is_empty());

        let report = StoredReport {
            device: "sw1".into(),
            generated_at: "2024-01-01_0001".into(),
            snapshot: "2024-01-01_0000".into(),
            augmentation: Augmentation::Els,
            report: DeviationReport::new(vec![], vec![]),
        };
        let id = store.save_report(&report).unwrap();
        assert_eq!(store.load_report("sw1", &id).unwrap(), report);

        assert_eq!(store.discard_reports("sw1").unwrap(), 1);
        assert_eq!(store.discard_reports("sw1").unwrap(), 0);
        assert!(matches!(
            store.load_report("sw1", &id),
            Err(StoreError::NotFound { kind: "report", .. })
        ));
    }
}
