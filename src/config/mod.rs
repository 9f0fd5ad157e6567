//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! audit.toml
//!     → loader.rs (parse & deserialize, anchor relative paths)
//!     → validation.rs (semantic checks)
//!     → AuditConfig (validated, immutable)
//!     → main.rs builds tables, templates, store and fleet from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Relative paths resolve against the config file's directory

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::AuditConfig;
pub use schema::ClassificationConfig;
pub use schema::DeviceConfig;
pub use schema::FleetConfig;
pub use schema::ObservabilityConfig;
pub use schema::PathsConfig;
pub use schema::TemplateFiles;
pub use validation::{validate_config, ValidationError};
