//! # Relabeling
//!
//! Renames blank nodes in quad lines through a [`LabelMap`]. Every token
//! must be covered by the map; a token is never left with its old label.

use vcsd_core::quad::{rewrite_blank_nodes, BLANK_NODE_PREFIX};
use vcsd_core::{DisclosureError, LabelMap, ProofGenerationError};

/// Replace every `_:<id>` with `_:<label_map[id]>`.
///
/// # Errors
///
/// [`ProofGenerationError::MissingLabel`] for the first blank node with no
/// entry in `label_map`.
pub fn relabel_quads(quads: &[String], label_map: &LabelMap) -> Result<Vec<String>, DisclosureError> {
    quads
        .iter()
        .map(|quad| {
            rewrite_blank_nodes(quad, |id| match label_map.get(id) {
                Some(label) => Ok(format!("{BLANK_NODE_PREFIX}{label}")),
                None => Err(DisclosureError::from(ProofGenerationError::MissingLabel {
                    label: id.to_string(),
                })),
            })
        })
        .collect()
}
