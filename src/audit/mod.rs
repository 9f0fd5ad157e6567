//! Deviation matching subsystem.
//!
//! # Data Flow
//! ```text
//! saved configuration text
//!     → lines.rs (trim, keep set/activate/deactivate/delete lines)
//!     → matcher.rs
//!         for each line:
//!             mandatory patterns (template order, first match consumed)
//!             → optional patterns (never consumed)
//!             → otherwise: extra
//!         leftover mandatory patterns → missing
//!     → report.rs (DeviationReport + AuditStatus)
//! ```
//!
//! # Design Decisions
//! - Matching never fails: every line and every pattern lands in one bucket
//! - First match in template order wins, even if a later pattern fits better
//! - Pure over its inputs: same inputs, same report

pub mod lines;
pub mod matcher;
pub mod report;

pub use lines::{config_lines, is_command_line};
pub use matcher::scan_deviations;
pub use report::{AuditStatus, DeviationReport};
