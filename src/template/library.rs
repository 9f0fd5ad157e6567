//! Template sources.
//!
//! # Responsibilities
//! - Read the five template files from the templates directory
//! - Drop blank lines and `#` comment lines before compilation
//!
//! # Design Decisions
//! - The baseline template is required; the augmentation and optional
//!   templates default to empty when their file is absent
//! - Line numbers are kept for diagnostics

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::TemplateFiles;

/// Errors raised while reading template files.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A non-blank, non-comment line of a template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLine {
    /// 1-based line number in the source file.
    pub number: usize,
    pub text: String,
}

/// Parse template text, skipping blank and `#` lines.
pub fn parse_template(text: &str) -> Vec<TemplateLine> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some(TemplateLine {
                    number: idx + 1,
                    text: trimmed.to_string(),
                })
            }
        })
        .collect()
}

/// All template sources for a fleet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateLibrary {
    pub baseline: Vec<TemplateLine>,
    pub els: Vec<TemplateLine>,
    pub non_els: Vec<TemplateLine>,
    pub routing: Vec<TemplateLine>,
    pub optional: Vec<TemplateLine>,
}

impl TemplateLibrary {
    /// Load every template named in `files` from `dir`.
    pub fn load(dir: &Path, files: &TemplateFiles) -> Result<Self, TemplateError> {
        let library = Self {
            baseline: read_required(&dir.join(&files.baseline))?,
            els: read_optional(&dir.join(&files.els))?,
            non_els: read_optional(&dir.join(&files.non_els))?,
            routing: read_optional(&dir.join(&files.routing))?,
            optional: read_optional(&dir.join(&files.optional))?,
        };

        tracing::debug!(
            dir = %dir.display(),
            baseline = library.baseline.len(),
            els = library.els.len(),
            non_els = library.non_els.len(),
            routing = library.routing.len(),
            optional = library.optional.len(),
            "Template library loaded"
        );

        Ok(library)
    }

    /// Build a library from in-memory template text.
    pub fn from_texts(baseline: &str, els: &str, non_els: &str, routing: &str, optional: &str) -> Self {
        Self {
            baseline: parse_template(baseline),
            els: parse_template(els),
            non_els: parse_template(non_els),
            routing: parse_template(routing),
            optional: parse_template(optional),
        }
    }
}

fn read_required(path: &Path) -> Result<Vec<TemplateLine>, TemplateError> {
    fs::read_to_string(path)
        .map(|text| parse_template(&text))
        .map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn read_optional(path: &Path) -> Result<Vec<TemplateLine>, TemplateError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(parse_template(&text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Template file not found, treating as empty");
            Ok(Vec::new())
        }
        Err(source) => Err(TemplateError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
