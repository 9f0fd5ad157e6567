//! Template line compilation.
//!
//! # Responsibilities
//! - Split a template line into literal and `{{variable}}` segments
//! - Escape literal text, substitute variable fragments verbatim
//! - Produce an anchored regex per line
//!
//! # Design Decisions
//! - Single left-to-right scan, no brace-matching regex
//! - Each brace type has a "one seen" state so a lone `{` or `}` stays literal
//! - An unterminated `{{name` at end of line is literal text
//! - Anchored as `^(?:expr)$`: a line with no placeholders matches exactly
//!   its own text even though matching uses regex search

use regex::Regex;
use thiserror::Error;

use crate::mapping::VariableMapping;

/// Errors raised while compiling a template line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    /// The line references a variable missing from the mapping.
    #[error("undefined variable {{{{{variable}}}}} in template line: {line}")]
    UndefinedVariable { variable: String, line: String },

    /// The assembled expression is not a valid regex (bad fragment).
    #[error("template line {line:?} does not compile to a valid pattern: {reason}")]
    InvalidPattern { line: String, reason: String },
}

/// One piece of a compiled template line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, already regex-escaped.
    Literal(String),
    /// A resolved placeholder.
    Variable { name: String, fragment: String },
}

/// A template line compiled into a match pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    segments: Vec<Segment>,
    expression: String,
    regex: Regex,
}

impl CompiledPattern {
    /// The template line this pattern came from (trimmed).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Unanchored regex body.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the placeholders used by this line, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Variable { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Regex search against a configuration line.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.expression == other.expression
    }
}

impl Eq for CompiledPattern {}

/// Ordered collection of compiled patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pattern: CompiledPattern) {
        self.patterns.push(pattern);
    }

    pub fn extend(&mut self, other: PatternSet) {
        self.patterns.extend(other.patterns);
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledPattern> {
        self.patterns.iter()
    }

    /// True if any pattern matches the line.
    pub fn any_match(&self, line: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(line))
    }
}

impl FromIterator<CompiledPattern> for PatternSet {
    fn from_iter<I: IntoIterator<Item = CompiledPattern>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a CompiledPattern;
    type IntoIter = std::slice::Iter<'a, CompiledPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Literal,
    Variable,
}

/// Compile one template line against a variable mapping.
pub fn compile_line(line: &str, mapping: &VariableMapping) -> Result<CompiledPattern, CompileError> {
    let source = line.trim();

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut name = String::new();
    let mut mode = Mode::Literal;
    let mut open_seen = false;
    let mut close_seen = false;

    for ch in source.chars() {
        match mode {
            Mode::Literal => {
                if ch == '{' {
                    if open_seen {
                        open_seen = false;
                        flush_literal(&mut literal, &mut segments);
                        mode = Mode::Variable;
                    } else {
                        open_seen = true;
                    }
                    continue;
                }
                if open_seen {
                    literal.push('{');
                    open_seen = false;
                }
                literal.push(ch);
            }
            Mode::Variable => {
                if ch == '}' {
                    if close_seen {
                        close_seen = false;
                        segments.push(resolve(name.trim(), source, mapping)?);
                        name.clear();
                        mode = Mode::Literal;
                    } else {
                        close_seen = true;
                    }
                    continue;
                }
                if close_seen {
                    name.push('}');
                    close_seen = false;
                }
                name.push(ch);
            }
        }
    }

    match mode {
        Mode::Literal => {
            if open_seen {
                literal.push('{');
            }
        }
        Mode::Variable => {
            literal.push_str("{{");
            literal.push_str(&name);
            if close_seen {
                literal.push('}');
            }
        }
    }
    flush_literal(&mut literal, &mut segments);

    // Fragments are grouped so a top-level `|` stays inside its variable.
    let expression: String = segments
        .iter()
        .map(|s| match s {
            Segment::Literal(text) => text.clone(),
            Segment::Variable { fragment, .. } => format!("(?:{fragment})"),
        })
        .collect::<String>()
        .trim_matches(|c: char| c == ' ' || c == '\t')
        .to_string();

    let regex = Regex::new(&format!("^(?:{expression})$")).map_err(|e| CompileError::InvalidPattern {
        line: source.to_string(),
        reason: e.to_string(),
    })?;

    Ok(CompiledPattern {
        source: source.to_string(),
        segments,
        expression,
        regex,
    })
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(regex::escape(literal)));
        literal.clear();
    }
}

fn resolve(name: &str, line: &str, mapping: &VariableMapping) -> Result<Segment, CompileError> {
    let fragment = mapping.get(name).ok_or_else(|| CompileError::UndefinedVariable {
        variable: name.to_string(),
        line: line.to_string(),
    })?;

    Ok(Segment::Variable {
        name: name.to_string(),
        fragment: fragment.to_string(),
    })
}
