//! # N-Quads Codec
//!
//! Moves quad lines in and out of `oxrdf`. Parsing goes through `oxttl`;
//! writing uses `oxrdf`'s `Display`, which is the canonical N-Quads form
//! (RDFC-1.0 escapes, `xsd:string` literals written bare). Every quad line
//! this crate emits passes through [`write_quad`], so the transformer and
//! the canonicalizer agree byte for byte on how a statement is spelled.

use oxrdf::{Dataset, Quad, QuadRef};
use oxttl::NQuadsParser;
use vcsd_core::DisclosureError;

/// Parse a single N-Quads statement.
///
/// # Errors
///
/// [`DisclosureError::InvalidQuad`] if `line` is not exactly one statement.
pub fn parse_quad(line: &str) -> Result<Quad, DisclosureError> {
    let mut statements = NQuadsParser::new().for_slice(line.as_bytes());
    let quad = statements
        .next()
        .ok_or_else(|| DisclosureError::invalid_quad(line, "no statement"))?
        .map_err(|e| DisclosureError::invalid_quad(line, e.to_string()))?;
    if statements.next().is_some() {
        return Err(DisclosureError::invalid_quad(line, "more than one statement"));
    }
    Ok(quad)
}

/// Parse quad lines into a dataset. Duplicate statements collapse.
pub fn parse_dataset(lines: &[String]) -> Result<Dataset, DisclosureError> {
    lines.iter().map(|line| parse_quad(line)).collect()
}

/// Write one quad as a newline-terminated canonical N-Quads line.
pub fn write_quad<'a>(quad: impl Into<QuadRef<'a>>) -> String {
    format!("{} .\n", quad.into())
}

/// Re-spell quad lines in canonical N-Quads form, sorted and de-duplicated.
pub fn normalize(lines: &[String]) -> Result<Vec<String>, DisclosureError> {
    let dataset = parse_dataset(lines)?;
    let mut out: Vec<String> = dataset.iter().map(write_quad).collect();
    out.sort();
    Ok(out)
}
