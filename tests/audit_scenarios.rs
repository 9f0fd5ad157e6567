//! End-to-end audit behaviour: templates in, deviation report out.

mod common;

use baseline_audit::audit::{scan_deviations, AuditStatus};
use baseline_audit::device::{DeviceContext, DeviceProfile, ModelFamily};
use baseline_audit::freshness::{RefreshController, ScanError};
use baseline_audit::lifecycle::build_controller;
use baseline_audit::mapping::VariableMapping;
use baseline_audit::store::ArtifactStore;
use baseline_audit::template::{
    compile_set, compile_templates, parse_template, Augmentation, CompileError, PatternSet, TemplateLibrary,
};
use common::{compliant_els, Fixture};

fn hostname_mapping() -> VariableMapping {
    [("HOSTNAME", "[A-Za-z0-9-]+")].into_iter().collect()
}

fn hostname_template() -> PatternSet {
    compile_set(&parse_template("set system host-name {{HOSTNAME}}"), &hostname_mapping()).unwrap()
}

#[test]
fn test_matching_config_is_clean() {
    let report = scan_deviations(&hostname_template(), &PatternSet::new(), &["set system host-name SW-CORE-01"]);

    assert_eq!(report.status, AuditStatus::Clean);
    assert!(report.missing.is_empty());
    assert!(report.extra.is_empty());
}

#[test]
fn test_empty_config_reports_template_as_missing() {
    let report = scan_deviations(&hostname_template(), &PatternSet::new(), &[] as &[&str]);

    assert_eq!(report.status, AuditStatus::MissingOnly);
    assert_eq!(report.missing, vec!["set system host-name {{HOSTNAME}}".to_string()]);
}

#[test]
fn test_empty_templates_report_everything_as_extra() {
    let line = "set interfaces ge-0/0/0 unit 0 family inet address 10.0.0.1/24";
    let report = scan_deviations(&PatternSet::new(), &PatternSet::new(), &[line]);

    assert_eq!(report.status, AuditStatus::ExtraOnly);
    assert_eq!(report.extra, vec![line.to_string()]);
}

#[test]
fn test_undefined_variable_aborts_compilation() {
    let err = compile_set(&parse_template("set snmp community {{UNDEFINED_VAR}}"), &hostname_mapping()).unwrap_err();

    assert!(matches!(err, CompileError::UndefinedVariable { ref variable, .. } if variable == "UNDEFINED_VAR"));
}

#[test]
fn test_undefined_variable_leaves_no_report() {
    let fixture = Fixture::new();
    fixture.write_template("baseline.conf", "set snmp community {{UNDEFINED_VAR}}\n");
    fixture.add_snapshot("sw1", "2024-05-01_0900", &["set snmp community public"]);

    let config = fixture.config();
    let controller = build_controller(&config).unwrap();
    let err = controller
        .scan(&DeviceContext::new("sw1", ModelFamily::Els), false)
        .unwrap_err();

    assert!(matches!(err, ScanError::Compile { ref device, .. } if device == "sw1"));
    assert!(err.to_string().contains("{{UNDEFINED_VAR}}"));
    assert!(fixture.report_files("sw1").is_empty());
}

#[test]
fn test_duplicate_template_lines_consume_one_config_line_each() {
    let mandatory = compile_set(
        &parse_template("set system services ssh\nset system services ssh\n"),
        &VariableMapping::default(),
    )
    .unwrap();
    let report = scan_deviations(&mandatory, &PatternSet::new(), &["set system services ssh"]);

    assert_eq!(report.status, AuditStatus::MissingOnly);
    assert_eq!(report.missing, vec!["set system services ssh".to_string()]);
}

#[test]
fn test_fixture_templates_per_device_family() {
    let fixture = Fixture::new();
    let config = fixture.config();
    let controller = build_controller(&config).unwrap();

    fixture.add_snapshot("sw1", "2024-05-01_0900", &compliant_els("sw1"));
    fixture.add_snapshot("sw2", "2024-05-01_0900", &compliant_els("sw2"));

    let sw1 = controller.scan(&DeviceContext::new("sw1", ModelFamily::Els), false).unwrap();
    assert_eq!(sw1.status(), Some(AuditStatus::Clean));
    assert_eq!(sw1.report().unwrap().augmentation, Augmentation::Els);

    let sw2 = controller.scan(&DeviceContext::new("sw2", ModelFamily::NonEls), false).unwrap();
    let stored = sw2.report().unwrap();
    assert_eq!(stored.augmentation, Augmentation::NonEls);
    assert_eq!(stored.report.status, AuditStatus::Both);
    assert_eq!(
        stored.report.missing,
        vec!["set ethernet-switching-options storm-control interface all".to_string()]
    );
    assert_eq!(stored.report.extra, vec!["set protocols lldp interface all".to_string()]);
}

#[test]
fn test_routing_device_uses_routing_templates() {
    let fixture = Fixture::new();
    let config = fixture.config();
    let controller = build_controller(&config).unwrap();

    fixture.add_snapshot(
        "r1",
        "2024-05-01_0900",
        &[
            "## Last commit: 2024-05-01 08:58:12 UTC",
            "  set system host-name r1  ",
            "set system services ssh",
            "set system syslog host 10.1.1.1 any warning",
            "set routing-options router-id 10.0.0.1",
            "set system login message Authorized access only",
            "set protocols bgp group transit neighbor 192.0.2.1",
        ],
    );

    let outcome = controller.scan(&DeviceContext::new("r1", ModelFamily::NonEls), false).unwrap();
    let stored = outcome.report().unwrap();

    assert_eq!(stored.augmentation, Augmentation::Routing);
    assert_eq!(stored.report.status, AuditStatus::ExtraOnly);
    assert_eq!(
        stored.report.extra,
        vec!["set protocols bgp group transit neighbor 192.0.2.1".to_string()]
    );
}

#[test]
fn test_library_loaded_from_disk_compiles_every_variant() {
    let fixture = Fixture::new();
    let config = fixture.config();
    let library = TemplateLibrary::load(&config.paths.templates_dir, &config.templates).unwrap();
    let mapping: VariableMapping = [
        ("HOSTNAME", "[A-Za-z0-9-]+"),
        ("SYSLOG_HOST", r"\d+\.\d+\.\d+\.\d+"),
        ("BANNER", ".+"),
    ]
    .into_iter()
    .collect();

    let els = compile_templates(&library, &DeviceProfile::new(ModelFamily::Els, false), &mapping).unwrap();
    assert_eq!(els.mandatory.len(), 4);
    assert_eq!(els.optional.len(), 1);

    let routing = compile_templates(&library, &DeviceProfile::new(ModelFamily::Els, true), &mapping).unwrap();
    assert_eq!(routing.augmentation, Augmentation::Routing);

    let controller = RefreshController::new(baseline_audit::MemoryStore::new(), library, mapping);
    assert!(controller.verify_templates().iter().all(|(_, r)| r.is_ok()));
    assert!(controller.store().report_ids("sw1").unwrap().is_empty());
}
