//! # JSON Pointer Paths
//!
//! Parses the RFC 6901 subset used to name claims for disclosure:
//! `/`-separated segments with `~1` → `/` and `~0` → `~` escapes.
//! Segments made only of ASCII digits (and no escapes) address array
//! elements; everything else addresses object keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DisclosureError;

/// One step of a parsed JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Array index.
    Index(usize),
    /// Object key.
    Key(String),
}

impl PathSegment {
    /// The segment as an object key. Indices render as their decimal form,
    /// which is how an index segment addresses an object.
    pub fn as_key(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Self::Index(i) => std::borrow::Cow::Owned(i.to_string()),
            Self::Key(k) => std::borrow::Cow::Borrowed(k),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

/// Parse a JSON pointer into its path segments.
///
/// The empty pointer `""` addresses the whole document and yields no
/// segments.
///
/// # Errors
///
/// Returns [`DisclosureError::InvalidPointer`] if a non-empty pointer does
/// not start with `/`, if a `~` is followed by anything other than `0` or
/// `1`, or if an all-digit segment overflows `usize`.
pub fn json_pointer_to_paths(pointer: &str) -> Result<Vec<PathSegment>, DisclosureError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(DisclosureError::invalid_pointer(
            pointer,
            "pointer must be empty or start with '/'",
        ));
    };

    rest.split('/')
        .map(|segment| parse_segment(pointer, segment))
        .collect()
}

fn parse_segment(pointer: &str, segment: &str) -> Result<PathSegment, DisclosureError> {
    if segment.contains('~') {
        return unescape(pointer, segment).map(PathSegment::Key);
    }
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        let index = segment.parse::<usize>().map_err(|e| {
            DisclosureError::invalid_pointer(pointer, format!("index {segment:?}: {e}"))
        })?;
        return Ok(PathSegment::Index(index));
    }
    Ok(PathSegment::Key(segment.to_string()))
}

fn unescape(pointer: &str, segment: &str) -> Result<String, DisclosureError> {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            Some(other) => {
                return Err(DisclosureError::invalid_pointer(
                    pointer,
                    format!("invalid escape sequence \"~{other}\""),
                ))
            }
            None => {
                return Err(DisclosureError::invalid_pointer(
                    pointer,
                    "dangling '~' at end of segment",
                ))
            }
        }
    }
    Ok(out)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn escape(key: &str) -> String {
        key.replace('~', "~0").replace('/', "~1")
    }

    proptest! {
        /// Escaping any key and parsing it back yields the key.
        #[test]
        fn escaped_key_round_trips(k in "[a-zA-Z~/]{1,12}") {
            let pointer = format!("/{}", escape(&k));
            let paths = json_pointer_to_paths(&pointer).unwrap();
            prop_assert_eq!(paths.len(), 1);
            prop_assert_eq!(paths[0].as_key().into_owned(), k);
        }

        /// Numeric segments always parse as indices.
        #[test]
        fn numeric_segment_is_index(n in 0usize..100_000) {
            let paths = json_pointer_to_paths(&format!("/{n}")).unwrap();
            prop_assert_eq!(paths, vec![PathSegment::Index(n)]);
        }

        /// Parsing never panics on arbitrary input.
        #[test]
        fn parser_never_panics(s in "\\PC{0,40}") {
            let _ = json_pointer_to_paths(&s);
        }
    }
}
