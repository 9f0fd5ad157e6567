//! Per-device input to a scan.

use crate::config::schema::DeviceConfig;
use crate::device::profile::ModelFamily;

/// Identity and model family of the device being audited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceContext {
    pub name: String,
    pub family: ModelFamily,
}

impl DeviceContext {
    pub fn new(name: impl Into<String>, family: ModelFamily) -> Self {
        Self {
            name: name.into(),
            family,
        }
    }

    /// Resolve the model family of an inventory entry.
    pub fn from_config<S: AsRef<str>>(device: &DeviceConfig, els_markers: &[S]) -> Self {
        Self::new(device.name.clone(), ModelFamily::classify(&device.model, els_markers))
    }
}
