//! Human-readable rendering of compiled patterns.
//!
//! Missing lines are reported in template form: each substituted fragment is
//! put back as `{{name}}` and the escaped literal text is cleaned up.

use crate::template::compiler::{CompiledPattern, Segment};

/// Undo regex escaping: `\X` becomes `X`, so `\\` collapses to `\`.
///
/// A trailing lone backslash is kept as-is.
pub fn unescape_regex_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }

    out
}

/// Render a pattern the way an operator wrote it.
pub fn render_pattern(pattern: &CompiledPattern) -> String {
    let mut rendered = String::new();

    for segment in pattern.segments() {
        match segment {
            Segment::Literal(escaped) => rendered.push_str(&unescape_regex_literal(escaped)),
            Segment::Variable { name, .. } => {
                rendered.push_str("{{");
                rendered.push_str(name);
                rendered.push_str("}}");
            }
        }
    }

    rendered.trim_matches(|c: char| c == ' ' || c == '\t').to_string()
}
