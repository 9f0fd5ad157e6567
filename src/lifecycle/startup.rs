//! Startup orchestration.
//!
//! # Responsibilities
//! - Load lookup tables and build the variable mapping
//! - Load the template library
//! - Wire the filesystem store into a refresh controller
//! - Resolve inventory entries into device contexts
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Templates are only read here; compilation happens per scan

use thiserror::Error;

use crate::config::AuditConfig;
use crate::device::DeviceContext;
use crate::freshness::RefreshController;
use crate::mapping::{build_variable_mapping, TableError, TermTable, VariableTable};
use crate::store::FsStore;
use crate::template::{TemplateError, TemplateLibrary};

/// Errors that prevent the auditor from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("device {0:?} is not in the inventory")]
    UnknownDevice(String),
}

/// Build a controller over the configured directories.
pub fn build_controller(config: &AuditConfig) -> Result<RefreshController<FsStore>, StartupError> {
    let terms = TermTable::load(&config.paths.terms_table)?;
    let variables = VariableTable::load(&config.paths.variables_table)?;
    let mapping = build_variable_mapping(&terms, &variables);

    tracing::info!(
        terms = terms.len(),
        variables = variables.len(),
        mapped = mapping.len(),
        "Variable mapping built"
    );

    let library = TemplateLibrary::load(&config.paths.templates_dir, &config.templates)?;
    let store = FsStore::new(&config.paths.snapshots_dir, &config.paths.reports_dir);

    tracing::info!(
        templates = %config.paths.templates_dir.display(),
        snapshots = %config.paths.snapshots_dir.display(),
        reports = %config.paths.reports_dir.display(),
        "Artifact store ready"
    );

    Ok(RefreshController::new(store, library, mapping))
}

/// Inventory entries named in `names`, or the whole inventory when empty.
pub fn select_devices(config: &AuditConfig, names: &[String]) -> Result<Vec<DeviceContext>, StartupError> {
    let markers = &config.classification.els_markers;

    if names.is_empty() {
        return Ok(config
            .devices
            .iter()
            .map(|d| DeviceContext::from_config(d, markers))
            .collect());
    }

    names
        .iter()
        .map(|name| {
            config
                .device(name)
                .map(|d| DeviceContext::from_config(d, markers))
                .ok_or_else(|| StartupError::UnknownDevice(name.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::device::ModelFamily;

    fn config() -> AuditConfig {
        parse_config(
            r#"
            [[devices]]
            name = "sw1"
            model = "EX4300-48T"

            [[devices]]
            name = "sw2"
            model = "EX4200-24T"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_select_all_devices() {
        let devices = select_devices(&config(), &[]).unwrap();

        assert_eq!(
            devices,
            vec![
                DeviceContext::new("sw1", ModelFamily::Els),
                DeviceContext::new("sw2", ModelFamily::NonEls),
            ]
        );
    }

    #[test]
    fn test_select_named_devices() {
        let devices = select_devices(&config(), &["sw2".to_string()]).unwrap();
        assert_eq!(devices, vec![DeviceContext::new("sw2", ModelFamily::NonEls)]);

        let err = select_devices(&config(), &["core1".to_string()]).unwrap_err();
        assert!(matches!(err, StartupError::UnknownDevice(name) if name == "core1"));
    }

    #[test]
    fn test_missing_tables_fail_fast() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config();
        config.paths.resolve_relative(dir.path());

        assert!(matches!(build_controller(&config), Err(StartupError::Table(_))));
    }
}
