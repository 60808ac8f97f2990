//! # Disclosure Planning
//!
//! Combines the grouper, selector, and canonicalizer into the data a holder
//! needs to derive a selective disclosure from a base credential:
//!
//! - the *mandatory* quads (always revealed, covered by the mandatory
//!   hash);
//! - where those quads sit among everything revealed
//!   (`mandatory_indexes`);
//! - which individually signed non-mandatory quads are revealed
//!   (`selective_indexes`);
//! - the reveal document the verifier receives;
//! - the label map the verifier needs to re-canonicalize the reveal
//!   document into the holder's labels.
//!
//! Index conventions:
//!
//! - `mandatory_indexes` are positions in the combined group's matching
//!   index list;
//! - `selective_indexes` are positions in the mandatory group's
//!   non-matching index list. Selective quads that are also mandatory have
//!   no such position and are skipped.

use serde_json::Value;
use vcsd_core::label_map::strip_canonical_id_map;
use vcsd_core::{
    Canonicalizer, DisclosureError, DisclosureOptions, DocumentTransformer, LabelMap,
    LabelMapFactory, ProofGenerationError,
};

use crate::group::{canonicalize_and_group, GroupDefinitions, GroupResult, GroupedCanonicalization};
use crate::select::select_document;

/// Group holding the mandatory pointers.
pub const MANDATORY_GROUP: &str = "mandatory";
/// Group holding the selective pointers.
pub const SELECTIVE_GROUP: &str = "selective";
/// Group holding mandatory and selective pointers together.
pub const COMBINED_GROUP: &str = "combined";

/// Everything needed to derive a disclosure.
#[derive(Debug, Clone, PartialEq)]
pub struct DisclosurePlan {
    /// Mandatory matching quads in index order, ready for
    /// [`hash_mandatory_quads`](crate::hash_mandatory_quads).
    pub mandatory_quads: Vec<String>,
    /// Positions of the mandatory quads among the combined quads.
    pub mandatory_indexes: Vec<usize>,
    /// Positions of the revealed selective quads among the non-mandatory
    /// quads.
    pub selective_indexes: Vec<usize>,
    /// The document revealed to the verifier. `None` when nothing is
    /// revealed.
    pub reveal_document: Option<Value>,
    /// Verifier canonical label → holder label (both without sigil).
    pub verifier_label_map: LabelMap,
    /// The grouping the plan was computed from.
    pub grouped: GroupedCanonicalization,
}

/// Plan a disclosure of `document`.
///
/// # Errors
///
/// Any error from [`canonicalize_and_group`], from selecting the reveal
/// document, or from re-canonicalizing the revealed quads.
/// [`ProofGenerationError::MissingLabel`] if the revealed quads mention a
/// blank node the holder's label map does not cover.
pub async fn plan_disclosure<T, C, F>(
    transformer: &T,
    canonicalizer: &C,
    document: &Value,
    factory: &F,
    mandatory_pointers: &[String],
    selective_pointers: &[String],
    options: &DisclosureOptions,
) -> Result<DisclosurePlan, DisclosureError>
where
    T: DocumentTransformer,
    C: Canonicalizer,
    F: LabelMapFactory,
{
    let combined_pointers: Vec<String> = mandatory_pointers
        .iter()
        .chain(selective_pointers)
        .cloned()
        .collect();
    let mut definitions = GroupDefinitions::new();
    definitions.insert(MANDATORY_GROUP.to_string(), mandatory_pointers.to_vec());
    definitions.insert(SELECTIVE_GROUP.to_string(), selective_pointers.to_vec());
    definitions.insert(COMBINED_GROUP.to_string(), combined_pointers.clone());

    let grouped =
        canonicalize_and_group(transformer, canonicalizer, document, factory, &definitions, options)
            .await?;
    let mandatory = group(&grouped, MANDATORY_GROUP)?;
    let selective = group(&grouped, SELECTIVE_GROUP)?;
    let combined = group(&grouped, COMBINED_GROUP)?;

    let combined_indexes = combined.matching_indexes();
    let mandatory_indexes = relative_positions(mandatory.matching.keys(), &combined_indexes);
    let non_mandatory_indexes = mandatory.non_matching_indexes();
    let selective_indexes = relative_positions(selective.matching.keys(), &non_mandatory_indexes);

    let reveal_document = select_document(&combined_pointers, document)?;

    let verifier = canonicalizer
        .canonicalize(&combined.deskolemized_quads, &options.canonicalize)
        .await?;
    let mut verifier_label_map = LabelMap::new();
    for (input, verifier_label) in strip_canonical_id_map(&verifier.canonical_id_map) {
        let holder_label = grouped
            .label_map
            .get(&input)
            .ok_or_else(|| ProofGenerationError::MissingLabel {
                label: input.clone(),
            })?;
        verifier_label_map.insert(verifier_label, holder_label.clone());
    }

    tracing::debug!(
        mandatory = mandatory_indexes.len(),
        selective = selective_indexes.len(),
        revealed = combined_indexes.len(),
        "planned disclosure"
    );

    Ok(DisclosurePlan {
        mandatory_quads: mandatory.matching_quads(),
        mandatory_indexes,
        selective_indexes,
        reveal_document,
        verifier_label_map,
        grouped,
    })
}

fn group<'g>(
    grouped: &'g GroupedCanonicalization,
    name: &str,
) -> Result<&'g GroupResult, DisclosureError> {
    grouped.group(name).ok_or_else(|| {
        DisclosureError::InvalidDocument(format!("group {name:?} was not computed"))
    })
}

/// Position of each of `indexes` within `within`, skipping absent ones.
fn relative_positions<'a>(indexes: impl Iterator<Item = &'a usize>, within: &[usize]) -> Vec<usize> {
    indexes
        .filter_map(|index| within.binary_search(index).ok())
        .collect()
}
