//! # Label Maps
//!
//! A label map renames blank nodes: input identifier → replacement label.
//! Maps are built fresh for every operation and never persisted. Both keys
//! and values are stored without the `_:` sigil unless stated otherwise.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{DisclosureError, ProofGenerationError};
use crate::quad::strip_blank_prefix;

/// Blank-node identifier → replacement label.
pub type LabelMap = BTreeMap<String, String>;

/// Strip the `_:` sigil from both keys and values of a canonical-identifier
/// map.
pub fn strip_canonical_id_map(canonical_id_map: &LabelMap) -> LabelMap {
    canonical_id_map
        .iter()
        .map(|(k, v)| {
            (
                strip_blank_prefix(k).to_string(),
                strip_blank_prefix(v).to_string(),
            )
        })
        .collect()
}

/// Check that `label_map` covers every key of `required` and never assigns
/// one label to two of those keys. Extra entries are ignored.
///
/// # Errors
///
/// [`ProofGenerationError::MissingLabel`] for the first uncovered key,
/// [`ProofGenerationError::DuplicateLabel`] for the first repeated label.
pub fn ensure_total(label_map: &LabelMap, required: &LabelMap) -> Result<(), DisclosureError> {
    if let Some(missing) = required.keys().find(|k| !label_map.contains_key(*k)) {
        return Err(ProofGenerationError::MissingLabel {
            label: missing.clone(),
        }
        .into());
    }
    let mut seen = BTreeSet::new();
    for label in required.keys().filter_map(|k| label_map.get(k)) {
        if !seen.insert(label.as_str()) {
            return Err(ProofGenerationError::DuplicateLabel {
                label: label.clone(),
            }
            .into());
        }
    }
    Ok(())
}
