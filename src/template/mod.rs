//! Template compilation subsystem.
//!
//! # Data Flow
//! ```text
//! template files
//!     → library.rs (read, drop blank/comment lines)
//!     → selection.rs (baseline + one augmentation, optional on its own)
//!     → compiler.rs (literal/placeholder scan → anchored regex)
//!     → PatternSet (mandatory), PatternSet (optional)
//!
//! Reporting:
//!     CompiledPattern → render.rs → "set system host-name {{HOSTNAME}}"
//! ```
//!
//! # Design Decisions
//! - Pattern sets are compiled fresh for every scan and consumed once
//! - An undefined placeholder is a hard error for the whole device
//! - Literal text is always escaped; fragments are inserted verbatim

pub mod compiler;
pub mod library;
pub mod render;
pub mod selection;

pub use compiler::{compile_line, CompileError, CompiledPattern, PatternSet, Segment};
pub use library::{parse_template, TemplateError, TemplateLibrary, TemplateLine};
pub use render::{render_pattern, unescape_regex_literal};
pub use selection::{compile_set, compile_templates, Augmentation, CompiledTemplates};
