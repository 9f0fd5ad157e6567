//! Greedy one-shot matching of configuration lines against patterns.

use crate::audit::lines::config_lines;
use crate::audit::report::DeviationReport;
use crate::template::compiler::{CompiledPattern, PatternSet};
use crate::template::render::render_pattern;

/// Classify every configuration line and every mandatory pattern.
///
/// Lines are trimmed and filtered to command lines first. Each mandatory
/// pattern satisfies at most one line: the first remaining pattern (in
/// template order) that matches a line is removed from the working set.
/// Lines left unmatched are checked against the optional set, whose
/// patterns may match any number of lines.
pub fn scan_deviations<S: AsRef<str>>(
    mandatory: &PatternSet,
    optional: &PatternSet,
    lines: &[S],
) -> DeviationReport {
    let mut remaining: Vec<&CompiledPattern> = mandatory.iter().collect();
    let mut extra = Vec::new();

    for line in config_lines(lines) {
        if let Some(idx) = remaining.iter().position(|p| p.is_match(&line)) {
            remaining.remove(idx);
            continue;
        }

        if optional.any_match(&line) {
            continue;
        }

        extra.push(line);
    }

    let missing: Vec<String> = remaining.into_iter().map(render_pattern).collect();

    tracing::trace!(
        patterns = mandatory.len(),
        missing = missing.len(),
        extra = extra.len(),
        "Deviation scan finished"
    );

    DeviationReport::new(missing, extra)
}
