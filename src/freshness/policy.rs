//! Freshness decision.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Newest artifact timestamps of a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub latest_snapshot: Option<NaiveDateTime>,
    pub latest_report: Option<NaiveDateTime>,
}

/// What the refresh controller should do for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Freshness {
    NoConfig,
    UpToDate,
    Stale,
}

impl Freshness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::NoConfig => "no-config",
            Freshness::UpToDate => "up-to-date",
            Freshness::Stale => "stale",
        }
    }
}

/// Decide whether a device needs a new scan.
pub fn evaluate(state: &ScanState, force: bool) -> Freshness {
    let Some(snapshot) = state.latest_snapshot else {
        return Freshness::NoConfig;
    };

    if force {
        return Freshness::Stale;
    }

    match state.latest_report {
        Some(report) if report >= snapshot => Freshness::UpToDate,
        _ => Freshness::Stale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(h, m, 0)
    }

    fn state(snapshot: Option<NaiveDateTime>, report: Option<NaiveDateTime>) -> ScanState {
        ScanState {
            latest_snapshot: snapshot,
            latest_report: report,
        }
    }

    #[test]
    fn test_no_snapshot_is_no_config() {
        assert_eq!(evaluate(&state(None, None), false), Freshness::NoConfig);
        assert_eq!(evaluate(&state(None, at(9, 0)), false), Freshness::NoConfig);
        assert_eq!(evaluate(&state(None, at(9, 0)), true), Freshness::NoConfig);
    }

    #[test]
    fn test_report_older_than_snapshot_is_stale() {
        assert_eq!(evaluate(&state(at(10, 0), at(9, 59)), false), Freshness::Stale);
        assert_eq!(evaluate(&state(at(10, 0), None), false), Freshness::Stale);
    }

    #[test]
    fn test_report_not_older_is_up_to_date() {
        assert_eq!(evaluate(&state(at(10, 0), at(10, 0)), false), Freshness::UpToDate);
        assert_eq!(evaluate(&state(at(10, 0), at(11, 30)), false), Freshness::UpToDate);
    }

    #[test]
    fn test_force_bypasses_comparison() {
        assert_eq!(evaluate(&state(at(10, 0), at(11, 30)), true), Freshness::Stale);
    }
}
