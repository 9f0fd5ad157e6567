//! Fleet auditing subsystem.
//!
//! # Data Flow
//! ```text
//! inventory (Vec<DeviceContext>)
//!     → FleetRunner::run
//!         → Semaphore permit (max_concurrent_scans)
//!         → per-device lock (DashMap<name, Mutex>)
//!         → spawn_blocking(RefreshController::scan)
//!     → Vec<DeviceAudit> in inventory order
//!
//! watch.rs: SnapshotWatcher event → device name → FleetRunner::scan_one
//! ```
//!
//! # Design Decisions
//! - Scans are synchronous file and regex work, so they run on the blocking pool
//! - Two scans of the same device never overlap; discard-then-save stays ordered
//! - A failing or panicking device is reported as a value, never aborts the fleet

pub mod runner;
pub mod watch;

pub use runner::{DeviceAudit, FleetRunner};
pub use watch::watch_fleet;
