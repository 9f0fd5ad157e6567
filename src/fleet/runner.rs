//! Bounded, per-device serialised scan runner.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, Semaphore};

use crate::device::DeviceContext;
use crate::freshness::{RefreshController, ScanError, ScanOutcome};
use crate::store::ArtifactStore;

/// Result of auditing one device.
#[derive(Debug)]
pub struct DeviceAudit {
    pub device: String,
    pub result: Result<ScanOutcome, ScanError>,
}

impl DeviceAudit {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Runs [`RefreshController::scan`] across many devices.
pub struct FleetRunner<S> {
    controller: Arc<RefreshController<S>>,
    /// One lock per device name, created on first use.
    device_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    /// Limits scans in flight.
    scan_limit: Arc<Semaphore>,
}

impl<S> Clone for FleetRunner<S> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            device_locks: Arc::clone(&self.device_locks),
            scan_limit: Arc::clone(&self.scan_limit),
        }
    }
}

impl<S: ArtifactStore + 'static> FleetRunner<S> {
    /// `max_concurrent_scans` of zero is treated as one.
    pub fn new(controller: RefreshController<S>, max_concurrent_scans: usize) -> Self {
        Self {
            controller: Arc::new(controller),
            device_locks: Arc::new(DashMap::new()),
            scan_limit: Arc::new(Semaphore::new(max_concurrent_scans.max(1))),
        }
    }

    pub fn controller(&self) -> &RefreshController<S> {
        &self.controller
    }

    fn device_lock(&self, device: &str) -> Arc<Mutex<()>> {
        self.device_locks
            .entry(device.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Audit a single device. Waits for any running scan of the same device
    /// before taking a slot, so queued duplicates never block other devices.
    pub async fn scan_one(&self, device: DeviceContext, force: bool) -> DeviceAudit {
        let name = device.name.clone();

        let guard = self.device_lock(&name).lock_owned().await;
        let permit = match Arc::clone(&self.scan_limit).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                return DeviceAudit {
                    device: name.clone(),
                    result: Err(ScanError::Aborted {
                        device: name,
                        reason: "scan limiter closed".to_string(),
                    }),
                }
            }
        };

        let controller = Arc::clone(&self.controller);
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let _guard = guard;
            controller.scan(&device, force)
        });

        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(ScanError::Aborted {
                device: name.clone(),
                reason: e.to_string(),
            }),
        };

        if let Err(e) = &result {
            tracing::error!(device = %name, error = %e, "Device audit failed");
        }

        DeviceAudit { device: name, result }
    }

    /// Audit every device concurrently. Results keep the order of `devices`.
    pub async fn run(&self, devices: Vec<DeviceContext>, force: bool) -> Vec<DeviceAudit> {
        let total = devices.len();
        let handles: Vec<_> = devices
            .into_iter()
            .map(|device| {
                let runner = self.clone();
                let name = device.name.clone();
                (name, tokio::spawn(async move { runner.scan_one(device, force).await }))
            })
            .collect();

        let mut audits = Vec::with_capacity(total);
        for (name, handle) in handles {
            let audit = match handle.await {
                Ok(audit) => audit,
                Err(e) => DeviceAudit {
                    device: name.clone(),
                    result: Err(ScanError::Aborted {
                        device: name,
                        reason: e.to_string(),
                    }),
                },
            };
            audits.push(audit);
        }

        let failed = audits.iter().filter(|a| a.is_failure()).count();
        tracing::info!(devices = total, failed, force, "Fleet audit finished");
        audits
    }
}
