//! Deviation report types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditStatus {
    /// Nothing missing, nothing extra.
    Clean,
    ExtraOnly,
    MissingOnly,
    /// Both missing and extra lines.
    Both,
}

impl AuditStatus {
    pub fn from_counts(missing: usize, extra: usize) -> Self {
        match (missing > 0, extra > 0) {
            (false, false) => AuditStatus::Clean,
            (false, true) => AuditStatus::ExtraOnly,
            (true, false) => AuditStatus::MissingOnly,
            (true, true) => AuditStatus::Both,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Clean => "clean",
            AuditStatus::ExtraOnly => "extra-only",
            AuditStatus::MissingOnly => "missing-only",
            AuditStatus::Both => "both",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of matching one configuration against its templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviationReport {
    /// Template lines with no matching configuration line, in template form.
    pub missing: Vec<String>,
    /// Configuration lines explained by neither template set.
    pub extra: Vec<String>,
    pub status: AuditStatus,
}

impl DeviationReport {
    pub fn new(missing: Vec<String>, extra: Vec<String>) -> Self {
        let status = AuditStatus::from_counts(missing.len(), extra.len());
        Self {
            missing,
            extra,
            status,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.status == AuditStatus::Clean
    }
}

impl fmt::Display for DeviationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "status: {}", self.status)?;
        if !self.missing.is_empty() {
            writeln!(f, "missing ({}):", self.missing.len())?;
            for line in &self.missing {
                writeln!(f, "  - {}", line)?;
            }
        }
        if !self.extra.is_empty() {
            writeln!(f, "extra ({}):", self.extra.len())?;
            for line in &self.extra {
                writeln!(f, "  + {}", line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_counts() {
        assert_eq!(AuditStatus::from_counts(0, 0), AuditStatus::Clean);
        assert_eq!(AuditStatus::from_counts(0, 3), AuditStatus::ExtraOnly);
        assert_eq!(AuditStatus::from_counts(2, 0), AuditStatus::MissingOnly);
        assert_eq!(AuditStatus::from_counts(1, 1), AuditStatus::Both);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&AuditStatus::MissingOnly).unwrap();
        assert_eq!(json, "\"missing-only\"");
        assert_eq!(AuditStatus::ExtraOnly.to_string(), "extra-only");
    }

    #[test]
    fn test_report_display() {
        let report = DeviationReport::new(
            vec!["set system host-name {{HOSTNAME}}".into()],
            vec!["set snmp community public".into()],
        );
        let text = report.to_string();

        assert!(text.starts_with("status: both\n"));
        assert!(text.contains("  - set system host-name {{HOSTNAME}}"));
        assert!(text.contains("  + set snmp community public"));
    }
}
