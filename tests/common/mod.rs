//! Shared fixture for integration tests: a throwaway audit tree on disk.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use baseline_audit::config::{load_config, AuditConfig};
use tempfile::TempDir;

pub const BASELINE: &str = "\
# management plane
set system host-name {{HOSTNAME}}
set system services ssh

set system syslog host {{SYSLOG_HOST}} any warning
";
pub const ELS: &str = "set protocols lldp interface all\n";
pub const NON_ELS: &str = "set ethernet-switching-options storm-control interface all\n";
pub const ROUTING: &str = "set routing-options router-id {{SYSLOG_HOST}}\n";
pub const OPTIONAL: &str = "set system login message {{BANNER}}\n";

const TERMS: &str = r#"term,regex
HOST,[A-Za-z0-9-]+
IPV4,"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}"
TEXT,.+
"#;

const VARIABLES: &str = "variable,term\nHOSTNAME,HOST\nSYSLOG_HOST,IPV4\nBANNER,TEXT\n";

const CONFIG: &str = r#"
[fleet]
max_concurrent_scans = 2

[[devices]]
name = "sw1"
model = "EX4300-48T"

[[devices]]
name = "sw2"
model = "EX4200-24T"

[[devices]]
name = "r1"
model = "MX204"
"#;

/// Templates, tables, config and per-device directories under a temp dir.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fixture.write("audit.toml", CONFIG);
        fixture.write("templates/terms.csv", TERMS);
        fixture.write("templates/variables.csv", VARIABLES);
        fixture.write_template("baseline.conf", BASELINE);
        fixture.write_template("els.conf", ELS);
        fixture.write_template("non-els.conf", NON_ELS);
        fixture.write_template("routing.conf", ROUTING);
        fixture.write_template("optional.conf", OPTIONAL);
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("audit.toml")
    }

    pub fn config(&self) -> AuditConfig {
        load_config(&self.config_path()).unwrap()
    }

    pub fn write(&self, relative: &str, text: &str) {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    pub fn write_template(&self, name: &str, text: &str) {
        self.write(&format!("templates/{name}"), text);
    }

    /// Store a snapshot named `<device>_<stamp>.conf`.
    pub fn add_snapshot<S: AsRef<str>>(&self, device: &str, stamp: &str, lines: &[S]) {
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push('\n');
        }
        self.write(&format!("snapshots/{device}/{device}_{stamp}.conf"), &text);
    }

    /// Report file names of a device, sorted.
    pub fn report_files(&self, device: &str) -> Vec<String> {
        let dir = self.root().join("reports").join(device);
        let mut names: Vec<String> = match fs::read_dir(dir) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

/// A snapshot of sw1 that satisfies the baseline and ELS templates.
pub fn compliant_els(host: &str) -> Vec<String> {
    vec![
        format!("set system host-name {host}"),
        "set system services ssh".to_string(),
        "set system syslog host 10.1.1.1 any warning".to_string(),
        "set protocols lldp interface all".to_string(),
    ]
}
