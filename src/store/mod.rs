//! Artifact storage subsystem.
//!
//! # Data Flow
//! ```text
//! RefreshController
//!     → ArtifactStore::snapshot_ids / report_ids   (timestamps)
//!     → ArtifactStore::load_snapshot               (configuration lines)
//!     → ArtifactStore::discard_reports             (forced refresh only)
//!     → ArtifactStore::save_report                 (new latest report)
//!
//! Implementations:
//!     fs.rs      <snapshots>/<device>/*, <reports>/<device>/*.json
//!     memory.rs  in-process maps (tests, embedding)
//!
//! watcher.rs: notify event under <snapshots>/<device>/ → device name → channel
//! ```
//!
//! # Design Decisions
//! - Identifiers are opaque strings carrying a `YYYY-MM-DD_HHMM` stamp
//! - A device with no artifacts yields empty id lists, not an error
//! - Callers serialise scans of the same device; stores do not lock

pub mod fs;
pub mod memory;
pub mod types;
pub mod watcher;

pub use fs::FsStore;
pub use memory::MemoryStore;
pub use types::{ArtifactStore, StoreError, StoredReport};
pub use watcher::SnapshotWatcher;
