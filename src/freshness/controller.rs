//! Refresh controller: decides, recomputes and persists.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::audit::{scan_deviations, AuditStatus};
use crate::device::{detect_routing_role, DeviceContext, DeviceProfile, ModelFamily};
use crate::freshness::policy::{evaluate, Freshness, ScanState};
use crate::freshness::stamp::{format_stamp, latest_stamped};
use crate::mapping::VariableMapping;
use crate::observability::metrics;
use crate::store::{ArtifactStore, StoreError, StoredReport};
use crate::template::{compile_templates, Augmentation, CompileError, TemplateLibrary};

/// Source of "now" for stamping new reports.
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Errors that abort a device scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("template compilation failed for {device}: {source}")]
    Compile {
        device: String,
        #[source]
        source: CompileError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("scan of {device} aborted: {reason}")]
    Aborted { device: String, reason: String },
}

/// Terminal result of a scan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// No configuration snapshot exists for the device.
    NoConfig,
    /// The newest report already covers the newest snapshot.
    UpToDate(StoredReport),
    /// A new report was computed and stored.
    Refreshed {
        report: StoredReport,
        /// Prior reports removed by a forced refresh.
        discarded: usize,
    },
}

impl ScanOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ScanOutcome::NoConfig => "no-config",
            ScanOutcome::UpToDate(_) => "up-to-date",
            ScanOutcome::Refreshed { .. } => "refreshed",
        }
    }

    pub fn report(&self) -> Option<&StoredReport> {
        match self {
            ScanOutcome::NoConfig => None,
            ScanOutcome::UpToDate(report) | ScanOutcome::Refreshed { report, .. } => Some(report),
        }
    }

    pub fn status(&self) -> Option<AuditStatus> {
        self.report().map(|r| r.report.status)
    }
}

struct Latest {
    snapshot: Option<(NaiveDateTime, String)>,
    report: Option<(NaiveDateTime, String)>,
}

impl Latest {
    fn state(&self) -> ScanState {
        ScanState {
            latest_snapshot: self.snapshot.as_ref().map(|(at, _)| *at),
            latest_report: self.report.as_ref().map(|(at, _)| *at),
        }
    }
}

/// Drives template auditing for devices backed by an artifact store.
pub struct RefreshController<S> {
    store: S,
    library: TemplateLibrary,
    mapping: VariableMapping,
    clock: Clock,
}

impl<S: ArtifactStore> RefreshController<S> {
    pub fn new(store: S, library: TemplateLibrary, mapping: VariableMapping) -> Self {
        Self {
            store,
            library,
            mapping,
            clock: local_now,
        }
    }

    /// Replace the clock used to stamp new reports.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn latest(&self, device: &str) -> Result<Latest, StoreError> {
        let snapshots = self.store.snapshot_ids(device)?;
        let reports = self.store.report_ids(device)?;

        Ok(Latest {
            snapshot: latest_stamped(&snapshots).map(|(at, id)| (at, id.to_string())),
            report: latest_stamped(&reports).map(|(at, id)| (at, id.to_string())),
        })
    }

    /// Freshness of a device without scanning it.
    pub fn freshness(&self, device: &str) -> Result<Freshness, ScanError> {
        Ok(evaluate(&self.latest(device)?.state(), false))
    }

    /// The newest stored report of a device, if any.
    pub fn latest_report(&self, device: &str) -> Result<Option<StoredReport>, ScanError> {
        match self.latest(device)?.report {
            Some((_, id)) => Ok(Some(self.store.load_report(device, &id)?)),
            None => Ok(None),
        }
    }

    /// Compile every template variant and report the mandatory pattern count
    /// or the first error of each.
    pub fn verify_templates(&self) -> Vec<(Augmentation, Result<usize, CompileError>)> {
        [
            DeviceProfile::new(ModelFamily::Els, false),
            DeviceProfile::new(ModelFamily::NonEls, false),
            DeviceProfile::new(ModelFamily::NonEls, true),
        ]
        .iter()
        .map(|profile| {
            let result = compile_templates(&self.library, profile, &self.mapping).map(|c| c.mandatory.len());
            (Augmentation::for_profile(profile), result)
        })
        .collect()
    }

    /// Audit one device, rescanning only when its report is stale or `force` is set.
    pub fn scan(&self, device: &DeviceContext, force: bool) -> Result<ScanOutcome, ScanError> {
        let name = device.name.as_str();
        let latest = self.latest(name)?;
        let freshness = evaluate(&latest.state(), force);

        tracing::debug!(device = name, ?freshness, force, "Freshness evaluated");

        let outcome = match (freshness, latest.snapshot, latest.report) {
            (Freshness::NoConfig, _, _) | (_, None, _) => {
                tracing::info!(device = name, "No configuration snapshot, skipping template audit");
                ScanOutcome::NoConfig
            }
            (Freshness::UpToDate, _, Some((_, report_id))) => {
                let report = self.store.load_report(name, &report_id)?;
                tracing::info!(device = name, status = %report.report.status, "Template report up to date");
                ScanOutcome::UpToDate(report)
            }
            (_, Some((snapshot_at, snapshot_id)), _) => {
                self.refresh(device, force, snapshot_at, snapshot_id)?
            }
        };

        metrics::record_scan(outcome.label(), outcome.status());
        Ok(outcome)
    }

    fn refresh(
        &self,
        device: &DeviceContext,
        force: bool,
        snapshot_at: NaiveDateTime,
        snapshot_id: String,
    ) -> Result<ScanOutcome, ScanError> {
        let name = device.name.as_str();
        let lines = self.store.load_snapshot(name, &snapshot_id)?;
        let profile = DeviceProfile::new(device.family, detect_routing_role(&lines));

        let compiled = compile_templates(&self.library, &profile, &self.mapping).map_err(|source| {
            metrics::record_compile_failure();
            tracing::error!(device = name, error = %source, "Template compilation failed");
            ScanError::Compile {
                device: name.to_string(),
                source,
            }
        })?;

        let report = scan_deviations(&compiled.mandatory, &compiled.optional, &lines);
        metrics::record_deviation_lines(report.missing.len(), report.extra.len());

        let discarded = if force { self.store.discard_reports(name)? } else { 0 };

        let generated_at = (self.clock)().max(snapshot_at);
        let stored = StoredReport {
            device: name.to_string(),
            generated_at: format_stamp(&generated_at),
            snapshot: snapshot_id,
            augmentation: compiled.augmentation,
            report,
        };
        let report_id = self.store.save_report(&stored)?;

        tracing::info!(
            device = name,
            status = %stored.report.status,
            missing = stored.report.missing.len(),
            extra = stored.report.extra.len(),
            augmentation = ?stored.augmentation,
            discarded,
            report = %report_id,
            "Template audit complete"
        );

        Ok(ScanOutcome::Refreshed {
            report: stored,
            discarded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn controller(store: MemoryStore) -> RefreshController<MemoryStore> {
        let library = TemplateLibrary::from_texts(
            "set system host-name {{HOSTNAME}}\nset system services ssh\n",
            "set vlans default vlan-id 1\n",
            "",
            "set routing-options router-id {{IPV4}}\n",
            "set system login message {{BANNER}}\n",
        );
        let mapping: VariableMapping = [
            ("HOSTNAME", "[A-Za-z0-9-]+"),
            ("IPV4", r"\d+\.\d+\.\d+\.\d+"),
            ("BANNER", ".+"),
        ]
        .into_iter()
        .collect();
        RefreshController::new(store, library, mapping).with_clock(fixed_clock)
    }

    fn sw1() -> DeviceContext {
        DeviceContext::new("sw1", ModelFamily::NonEls)
    }

    #[test]
    fn test_no_config() {
        let ctl = controller(MemoryStore::new());
        assert_eq!(ctl.scan(&sw1(), false).unwrap(), ScanOutcome::NoConfig);
        assert_eq!(ctl.scan(&sw1(), true).unwrap(), ScanOutcome::NoConfig);
    }

    #[test]
    fn test_stale_then_up_to_date() {
        let store = MemoryStore::new();
        store.add_snapshot("sw1", "sw1_2024-05-01_0900.conf", &["set system host-name sw1", "set system services ssh"]);
        let ctl = controller(store);

        let first = ctl.scan(&sw1(), false).unwrap();
        assert_eq!(first.label(), "refreshed");
        assert_eq!(first.status(), Some(AuditStatus::Clean));
        assert_eq!(first.report().unwrap().generated_at, "2024-05-01_1200");

        let second = ctl.scan(&sw1(), false).unwrap();
        assert_eq!(second.label(), "up-to-date");
        assert_eq!(second.report(), first.report());
        assert_eq!(ctl.store().report_ids("sw1").unwrap().len(), 1);
    }

    #[test]
    fn test_newer_snapshot_makes_report_stale() {
        let store = MemoryStore::new();
        store.add_snapshot("sw1", "sw1_2024-05-01_0900.conf", &["set system host-name sw1", "set system services ssh"]);
        let ctl = controller(store);
        ctl.scan(&sw1(), false).unwrap();

        ctl.store().add_snapshot("sw1", "sw1_2024-05-02_0800.conf", &["set system host-name sw1"]);
        assert_eq!(ctl.freshness("sw1").unwrap(), Freshness::Stale);

        let outcome = ctl.scan(&sw1(), false).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.snapshot, "sw1_2024-05-02_0800.conf");
        assert_eq!(report.generated_at, "2024-05-02_0800");
        assert_eq!(report.report.missing, vec!["set system services ssh".to_string()]);
        assert_eq!(ctl.store().report_ids("sw1").unwrap().len(), 2);
    }

    #[test]
    fn test_force_discards_prior_reports() {
        let store = MemoryStore::new();
        store.add_snapshot("sw1", "sw1_2024-05-01_0900.conf", &["set system services ssh"]);
        let ctl = controller(store);
        ctl.scan(&sw1(), false).unwrap();

        let outcome = ctl.scan(&sw1(), true).unwrap();
        assert!(matches!(outcome, ScanOutcome::Refreshed { discarded: 1, .. }));
        assert_eq!(ctl.store().report_ids("sw1").unwrap().len(), 1);
    }

    #[test]
    fn test_routing_role_detected_from_snapshot() {
        let store = MemoryStore::new();
        store.add_snapshot(
            "r1",
            "r1_2024-05-01_0900.conf",
            &["set system host-name r1", "set system services ssh", "set protocols ospf area 0 interface lo0.0"],
        );
        let ctl = controller(store);

        let outcome = ctl.scan(&DeviceContext::new("r1", ModelFamily::Els), false).unwrap();
        let report = outcome.report().unwrap();

        assert_eq!(report.augmentation, Augmentation::Routing);
        assert_eq!(report.report.missing, vec!["set routing-options router-id {{IPV4}}".to_string()]);
        assert_eq!(report.report.extra, vec!["set protocols ospf area 0 interface lo0.0".to_string()]);
    }

    #[test]
    fn test_compile_error_leaves_reports_untouched() {
        let store = MemoryStore::new();
        store.add_snapshot("sw1", "sw1_2024-05-01_0900.conf", &["set system services ssh"]);
        let ctl = controller(store.clone());
        ctl.scan(&sw1(), false).unwrap();

        let broken = TemplateLibrary::from_texts("set system location {{UNDEFINED_VAR}}\n", "", "", "", "");
        let ctl = RefreshController::new(store, broken, VariableMapping::default()).with_clock(fixed_clock);

        let err = ctl.scan(&sw1(), true).unwrap_err();
        assert!(matches!(err, ScanError::Compile { .. }));
        assert_eq!(ctl.store().report_ids("sw1").unwrap().len(), 1);
    }

    #[test]
    fn test_verify_templates() {
        let ctl = controller(MemoryStore::new());
        let results = ctl.verify_templates();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], (Augmentation::Els, Ok(3)));
        assert_eq!(results[1], (Augmentation::NonEls, Ok(2)));
        assert_eq!(results[2], (Augmentation::Routing, Ok(3)));
    }
}
