//! `YYYY-MM-DD_HHMM` timestamps embedded in identifiers.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

/// chrono format of an embedded stamp.
pub const STAMP_FORMAT: &str = "%Y-%m-%d_%H%M";

static STAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}_\d{4}").expect("stamp regex is valid"));

/// Parse the last valid stamp found in an identifier.
pub fn parse_stamp(identifier: &str) -> Option<NaiveDateTime> {
    STAMP_RE
        .find_iter(identifier)
        .filter_map(|m| NaiveDateTime::parse_from_str(m.as_str(), STAMP_FORMAT).ok())
        .last()
}

pub fn format_stamp(at: &NaiveDateTime) -> String {
    at.format(STAMP_FORMAT).to_string()
}

/// Newest identifier by embedded stamp, with its timestamp.
///
/// Identifiers without a stamp are skipped. Ties keep the
/// lexicographically greatest identifier.
pub fn latest_stamped<S: AsRef<str>>(ids: &[S]) -> Option<(NaiveDateTime, &str)> {
    ids.iter()
        .filter_map(|id| {
            let id: &str = id.as_ref();
            match parse_stamp(id) {
                Some(at) => Some((at, id)),
                None => {
                    tracing::warn!(id, "Identifier has no YYYY-MM-DD_HHMM stamp, ignoring");
                    None
                }
            }
        })
        .max()
}
