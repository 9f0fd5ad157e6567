//! Configuration baseline auditor library.
//!
//! Compiles `{{VARIABLE}}` templates into anchored regular expressions,
//! matches device configuration snapshots against them and keeps a
//! per-device deviation report fresh.

// Core pipeline
pub mod mapping;
pub mod template;
pub mod device;
pub mod audit;

// Persistence & scheduling
pub mod store;
pub mod freshness;
pub mod fleet;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use audit::{AuditStatus, DeviationReport};
pub use config::schema::AuditConfig;
pub use fleet::{DeviceAudit, FleetRunner};
pub use freshness::{RefreshController, ScanError, ScanOutcome};
pub use lifecycle::Shutdown;
pub use store::{ArtifactStore, FsStore, MemoryStore, StoredReport};
