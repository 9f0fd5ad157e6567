//! Device classification.
//!
//! # Data Flow
//! ```text
//! DeviceConfig (name, model)          saved configuration lines
//!     → ModelFamily::classify             → detect_routing_role
//!                 \                      /
//!                  → DeviceProfile (family × routing flag)
//!                  → template selection
//! ```
//!
//! # Design Decisions
//! - The model string is inspected once; everything downstream sees an enum
//! - Routing role comes from the configuration itself, not the inventory

pub mod context;
pub mod profile;

pub use context::DeviceContext;
pub use profile::{detect_routing_role, DeviceProfile, ModelFamily, DEFAULT_ELS_MARKERS};
