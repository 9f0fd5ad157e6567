//! Snapshot directory watcher.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use notify::{Watcher, RecursiveMode, Event, RecommendedWatcher, Config};
use tokio::sync::mpsc;

/// Watches the snapshots tree and reports which device got a new snapshot.
pub struct SnapshotWatcher {
    root: PathBuf,
    update_tx: mpsc::UnboundedSender<String>,
}

impl SnapshotWatcher {
    /// Create a new SnapshotWatcher.
    ///
    /// Returns the watcher and a receiver of device names.
    pub fn new(root: &Path) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

        (Self {
            root,
            update_tx,
        }, update_rx)
    }

    /// Start watching in a background thread. Dropping the returned
    /// watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let root = self.root.clone();

        let mut watcher = RecommendedWatcher::new(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        for path in &event.paths {
                            if let Some(device) = device_for_path(&root, path) {
                                tracing::debug!(device = %device, path = %path.display(), "Snapshot change detected");
                                let _ = tx.send(device);
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            }
        }, Config::default().with_poll_interval(Duration::from_secs(2)))?;

        watcher.watch(&self.root, RecursiveMode::Recursive)?;

        tracing::info!(path = ?self.root, "Snapshot watcher started");
        Ok(watcher)
    }
}

/// Device owning a snapshot file: `<root>/<device>/<file>`.
fn device_for_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();

    match (components.next(), components.next(), components.next()) {
        (Some(Component::Normal(device)), Some(Component::Normal(file)), None) => {
            let file = file.to_str()?;
            if file.starts_with('.') {
                return None;
            }
            device.to_str().map(str::to_string)
        }
        _ => None,
    }
}
