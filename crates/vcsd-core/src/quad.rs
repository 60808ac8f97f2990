//! # Quad Lines — Blank-Node Token Grammar
//!
//! Quad lines are N-Quads statements (`subject predicate object [graph] .`)
//! each terminated by a single `\n`. This module is the only place that knows
//! how to find blank-node tokens and bracketed IRIs inside a line. Every
//! rewrite in the engine (skolemization, deskolemization, relabeling) goes
//! through [`rewrite_blank_nodes`] or [`rewrite_iris`].
//!
//! ## Token Grammar
//!
//! A line is scanned left to right for three alternatives, first match wins:
//!
//! 1. a quoted literal `"…"` with backslash escapes, never rewritten;
//! 2. a bracketed IRI `<…>`;
//! 3. a blank-node token `_:` followed by one or more non-whitespace
//!    characters.
//!
//! Skipping literals means a literal whose text happens to contain `_:` or
//! `<urn:…>` is left alone.

use std::sync::OnceLock;

use regex::Regex;

/// Sigil that starts every blank-node token.
pub const BLANK_NODE_PREFIX: &str = "_:";

fn blank_node_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""(?:[^"\\]|\\.)*"|<[^>]*>|_:(\S+)"#).expect("blank node pattern is valid")
    })
}

fn iri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""(?:[^"\\]|\\.)*"|<([^>]*)>"#).expect("IRI pattern is valid")
    })
}

/// Rewrite every blank-node token of `line`.
///
/// `rewrite` receives the label without its `_:` sigil and returns the full
/// replacement token (which need not be a blank node). The first error
/// returned by `rewrite` aborts the rewrite.
pub fn rewrite_blank_nodes<E>(
    line: &str,
    mut rewrite: impl FnMut(&str) -> Result<String, E>,
) -> Result<String, E> {
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for caps in blank_node_pattern().captures_iter(line) {
        if let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) {
            out.push_str(&line[last..whole.start()]);
            out.push_str(&rewrite(label.as_str())?);
            last = whole.end();
        }
    }
    out.push_str(&line[last..]);
    Ok(out)
}

/// Rewrite bracketed IRIs of `line`.
///
/// `rewrite` receives the IRI without its angle brackets. Returning `Some`
/// replaces the whole `<…>` token; `None` keeps it.
pub fn rewrite_iris(line: &str, mut rewrite: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for caps in iri_pattern().captures_iter(line) {
        if let (Some(whole), Some(iri)) = (caps.get(0), caps.get(1)) {
            if let Some(replacement) = rewrite(iri.as_str()) {
                out.push_str(&line[last..whole.start()]);
                out.push_str(&replacement);
                last = whole.end();
            }
        }
    }
    out.push_str(&line[last..]);
    out
}

/// Labels (without sigil) of every blank-node token in `line`, in order of
/// appearance. Repeated labels are repeated.
pub fn blank_node_labels(line: &str) -> Vec<&str> {
    blank_node_pattern()
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Remove a leading `_:` sigil, if present.
pub fn strip_blank_prefix(id: &str) -> &str {
    id.strip_prefix(BLANK_NODE_PREFIX).unwrap_or(id)
}

/// Returns `true` if `id` is a blank-node identifier (`_:` prefixed).
pub fn is_blank_node_id(id: &str) -> bool {
    id.starts_with(BLANK_NODE_PREFIX)
}

/// Split an N-Quads document into lines, each keeping its trailing `\n`.
/// Empty lines are dropped.
pub fn split_quads(nquads: &str) -> Vec<String> {
    nquads
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("{line}\n"))
        .collect()
}

/// Concatenate quad lines into one N-Quads document.
pub fn join_quads(quads: &[String]) -> String {
    quads.concat()
}
