//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load tables → Build mapping → Load templates → Controller over FsStore
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     watch loop selects on ShutdownSignal::recv
//!     → stop taking watcher events → let in-flight scans finish → exit
//! ```
//!
//! # Design Decisions
//! - One-shot audits never install signal handlers
//! - Scans are never cancelled mid-way; stores only see whole reports

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use signals::shutdown_on_signal;
pub use startup::{build_controller, select_devices, StartupError};
