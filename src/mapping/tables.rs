//! Two-column lookup tables.
//!
//! # Responsibilities
//! - Load `term,regex` and `variable,term` tables from CSV
//! - Reject rows that do not have exactly two fields
//!
//! Both files carry a header row. Cells are whitespace-trimmed, so a
//! fragment that needs significant leading/trailing spaces must be written
//! as a regex (e.g. `\s`) rather than a literal space.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a lookup table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read table {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table {name}: {source}")]
    Csv {
        name: String,
        #[source]
        source: csv::Error,
    },

    #[error("table {name}, line {line}: expected 2 fields, found {found}")]
    Malformed { name: String, line: u64, found: usize },

    #[error("table {name}, line {line}: empty key")]
    EmptyKey { name: String, line: u64 },
}

/// Term name → regex fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermTable(HashMap<String, String>);

/// Variable name → term name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable(HashMap<String, String>);

macro_rules! two_column_table {
    ($ty:ident) => {
        impl $ty {
            /// Load the table from a CSV file with a header row.
            pub fn load(path: &Path) -> Result<Self, TableError> {
                let name = path.display().to_string();
                let file = File::open(path).map_err(|source| TableError::Io {
                    name: name.clone(),
                    source,
                })?;
                Self::from_reader(&name, file)
            }

            /// Parse the table from any CSV source. `name` is used in errors.
            pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self, TableError> {
                read_pairs(name, reader).map(Self)
            }

            pub fn get(&self, key: &str) -> Option<&str> {
                self.0.get(key).map(String::as_str)
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
                self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
            }
        }

        impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for $ty {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
            }
        }
    };
}

two_column_table!(TermTable);
two_column_table!(VariableTable);

fn read_pairs<R: Read>(name: &str, reader: R) -> Result<HashMap<String, String>, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut pairs = HashMap::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| TableError::Csv {
            name: name.to_string(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != 2 {
            return Err(TableError::Malformed {
                name: name.to_string(),
                line,
                found: record.len(),
            });
        }
        if record[0].is_empty() {
            return Err(TableError::EmptyKey {
                name: name.to_string(),
                line,
            });
        }

        if let Some(previous) = pairs.insert(record[0].to_string(), record[1].to_string()) {
            tracing::warn!(table = %name, key = &record[0], previous = %previous, "Duplicate key, last row wins");
        }
    }

    Ok(pairs)
}
