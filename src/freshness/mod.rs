//! Freshness policy and refresh control.
//!
//! # States
//! - NoConfig: no snapshot exists; nothing to scan, old reports untouched
//! - UpToDate: newest report is not older than newest snapshot
//! - Stale: no report yet, or a newer snapshot exists
//!
//! # State Transitions
//! ```text
//! no snapshot                               → NoConfig
//! forced refresh                            → Stale (prior reports discarded)
//! no report  | snapshot > report            → Stale
//! report >= snapshot                        → UpToDate
//!
//! Stale → compile templates → match → persist report stamped
//!         max(now, snapshot) → becomes the newest report
//! ```
//!
//! # Design Decisions
//! - Timestamps come from identifiers (`YYYY-MM-DD_HHMM`), never file mtimes
//! - Identifiers without a parseable stamp are ignored
//! - Templates compile before anything is discarded, so a compile error
//!   leaves stored reports as they were

pub mod controller;
pub mod policy;
pub mod stamp;

pub use controller::{RefreshController, ScanError, ScanOutcome};
pub use policy::{evaluate, Freshness, ScanState};
pub use stamp::{format_stamp, latest_stamped, parse_stamp, STAMP_FORMAT};
