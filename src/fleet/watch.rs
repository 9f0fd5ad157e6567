//! Continuous auditing driven by snapshot arrivals.

use crate::config::AuditConfig;
use crate::device::DeviceContext;
use crate::fleet::runner::{DeviceAudit, FleetRunner};
use crate::lifecycle::ShutdownSignal;
use crate::store::{ArtifactStore, SnapshotWatcher};

/// Audit the whole inventory once, then re-audit each device whose snapshot
/// directory changes until `shutdown` fires. Every batch of results is passed
/// to `on_audit`.
pub async fn watch_fleet<S, F>(
    fleet: &FleetRunner<S>,
    config: &AuditConfig,
    mut shutdown: ShutdownSignal,
    mut on_audit: F,
) -> Result<(), notify::Error>
where
    S: ArtifactStore + 'static,
    F: FnMut(&[DeviceAudit]),
{
    let markers = &config.classification.els_markers;

    // Watch first so snapshots landing during the initial audit still queue an event.
    let (watcher, mut updates) = SnapshotWatcher::new(&config.paths.snapshots_dir);
    let _watcher = watcher.run()?;

    let inventory: Vec<DeviceContext> = config
        .devices
        .iter()
        .map(|d| DeviceContext::from_config(d, markers))
        .collect();
    on_audit(&fleet.run(inventory, false).await);

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            update = updates.recv() => {
                let Some(name) = update else { break };
                let Some(entry) = config.device(&name) else {
                    tracing::debug!(device = %name, "Snapshot for device outside the inventory ignored");
                    continue;
                };
                let audit = fleet.scan_one(DeviceContext::from_config(entry, markers), false).await;
                on_audit(std::slice::from_ref(&audit));
            }
        }
    }

    tracing::info!("Snapshot watch stopped");
    Ok(())
}
