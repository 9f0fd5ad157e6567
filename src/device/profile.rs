//! Model family and routing-role resolution.

use serde::{Deserialize, Serialize};

/// Model substrings that identify ELS-capable hardware.
pub const DEFAULT_ELS_MARKERS: &[&str] = &[
    "EX2300", "EX3400", "EX4300", "EX4400", "EX4600", "EX4650", "EX9200", "QFX",
];

/// Dynamic routing protocols whose presence makes a device a routing point.
const ROUTING_PROTOCOLS: &[&str] = &["ospf", "ospf3", "bgp", "isis", "rip", "ripng"];

/// Configuration syntax family of a device model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFamily {
    /// Enhanced Layer 2 Software.
    Els,
    NonEls,
}

impl ModelFamily {
    /// Classify a model string by case-insensitive substring match.
    pub fn classify<S: AsRef<str>>(model: &str, els_markers: &[S]) -> Self {
        let model = model.to_ascii_uppercase();
        let is_els = els_markers.iter().any(|marker| {
            let marker: &str = marker.as_ref();
            !marker.is_empty() && model.contains(&marker.to_ascii_uppercase())
        });

        if is_els {
            ModelFamily::Els
        } else {
            ModelFamily::NonEls
        }
    }
}

/// Everything template selection needs to know about a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub family: ModelFamily,
    /// Device runs a dynamic routing protocol.
    pub routing: bool,
}

impl DeviceProfile {
    pub fn new(family: ModelFamily, routing: bool) -> Self {
        Self { family, routing }
    }
}

/// True if the configuration carries a dynamic routing protocol stanza.
pub fn detect_routing_role<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().any(|line| {
        let line: &str = line.as_ref();
        let mut words = line.split_whitespace();
        matches!(
            (words.next(), words.next(), words.next()),
            (Some("set"), Some("protocols"), Some(protocol)) if ROUTING_PROTOCOLS.contains(&protocol)
        )
    })
}
