//! Variable resolution subsystem.
//!
//! # Data Flow
//! ```text
//! terms table (term,regex)        variables table (variable,term)
//!     → tables.rs (CSV load)          → tables.rs (CSV load)
//!              \                      /
//!               → builder.rs (one-level join)
//!               → VariableMapping (variable → regex fragment)
//! ```
//!
//! # Design Decisions
//! - Tables are immutable once loaded
//! - A variable pointing at an unknown term is dropped from the mapping,
//!   not rejected here; the template compiler reports it when used
//! - Lookups are key-based, no ordering guarantees

pub mod builder;
pub mod tables;

pub use builder::{build_variable_mapping, VariableMapping};
pub use tables::{TableError, TermTable, VariableTable};
