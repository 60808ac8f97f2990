//! # Grouping
//!
//! Canonicalizes a credential once and partitions its canonical quads per
//! named group of JSON pointers. A group's `matching` quads are the ones
//! its selection produces; `non_matching` are the rest. Indices refer to
//! positions in the full canonical quad list, so groups computed together
//! can be compared by index.
//!
//! Group selections only read the shared skolemized document and label
//! map, and run concurrently.

use std::collections::{BTreeMap, HashSet};

use futures::future::try_join_all;
use serde_json::Value;
use vcsd_core::{
    Canonicalizer, DisclosureError, DisclosureOptions, DocumentTransformer, LabelMap,
    LabelMapFactory,
};

use crate::label_replacement::{label_replacement_canonicalize_quads, LabelReplacedQuads};
use crate::select::{select_canonical_quads, CanonicalSelection};
use crate::skolemize::{skolemize_compact_document, to_deskolemized_quads};

/// Group name → JSON pointers.
pub type GroupDefinitions = BTreeMap<String, Vec<String>>;

/// One group's partition of the canonical quads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupResult {
    /// Index → quad for quads selected by the group.
    pub matching: BTreeMap<usize, String>,
    /// Index → quad for all other quads.
    pub non_matching: BTreeMap<usize, String>,
    /// The group selection's quads before relabeling.
    pub deskolemized_quads: Vec<String>,
}

impl GroupResult {
    /// Matching quads in index order.
    pub fn matching_quads(&self) -> Vec<String> {
        self.matching.values().cloned().collect()
    }

    /// Non-matching quads in index order.
    pub fn non_matching_quads(&self) -> Vec<String> {
        self.non_matching.values().cloned().collect()
    }

    /// Matching indices in ascending order.
    pub fn matching_indexes(&self) -> Vec<usize> {
        self.matching.keys().copied().collect()
    }

    /// Non-matching indices in ascending order.
    pub fn non_matching_indexes(&self) -> Vec<usize> {
        self.non_matching.keys().copied().collect()
    }
}

/// Everything produced by [`canonicalize_and_group`].
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedCanonicalization {
    /// Group name → partition.
    pub groups: BTreeMap<String, GroupResult>,
    /// The skolemized document, expanded.
    pub skolemized_expanded_document: Value,
    /// The skolemized document, compact.
    pub skolemized_compact_document: Value,
    /// The full document's quads with skolem URNs turned back into blank
    /// nodes.
    pub deskolemized_quads: Vec<String>,
    /// Input blank-node identifier → final label.
    pub label_map: LabelMap,
    /// The full document's canonical quads, relabeled and sorted.
    pub quads: Vec<String>,
}

impl GroupedCanonicalization {
    /// Look up a group by name.
    pub fn group(&self, name: &str) -> Option<&GroupResult> {
        self.groups.get(name)
    }
}

/// Canonicalize `document` and partition its quads for each group.
///
/// # Errors
///
/// Any skolemization, canonicalization, factory, or selection error; the
/// first failing group aborts the whole call.
pub async fn canonicalize_and_group<T, C, F>(
    transformer: &T,
    canonicalizer: &C,
    document: &Value,
    factory: &F,
    group_definitions: &GroupDefinitions,
    options: &DisclosureOptions,
) -> Result<GroupedCanonicalization, DisclosureError>
where
    T: DocumentTransformer,
    C: Canonicalizer,
    F: LabelMapFactory,
{
    let urn_scheme = options.urn_scheme.as_str();
    let skolemized =
        skolemize_compact_document(transformer, document, urn_scheme, None, &options.transform)
            .await?;
    let deskolemized_quads =
        to_deskolemized_quads(transformer, &skolemized.expanded, urn_scheme, &options.transform)
            .await?;
    let LabelReplacedQuads {
        label_map,
        canonical_quads: quads,
    } = label_replacement_canonicalize_quads(
        canonicalizer,
        &deskolemized_quads,
        factory,
        &options.canonicalize,
    )
    .await?;

    for (name, pointers) in group_definitions {
        if pointers.is_empty() {
            tracing::warn!(group = %name, "group has no pointers and matches nothing");
        }
    }

    let selections = try_join_all(group_definitions.iter().map(|(name, pointers)| {
        let compact = &skolemized.compact;
        let label_map = &label_map;
        async move {
            let selection = select_canonical_quads(
                transformer,
                pointers.as_slice(),
                compact,
                label_map,
                urn_scheme,
                &options.transform,
            )
            .await?;
            Ok::<_, DisclosureError>((name.clone(), selection))
        }
    }))
    .await?;

    let groups: BTreeMap<String, GroupResult> = selections
        .into_iter()
        .map(|(name, selection)| (name, partition(&quads, selection)))
        .collect();

    tracing::debug!(
        quads = quads.len(),
        groups = groups.len(),
        blank_nodes = label_map.len(),
        "canonicalized and grouped document"
    );

    Ok(GroupedCanonicalization {
        groups,
        skolemized_expanded_document: skolemized.expanded,
        skolemized_compact_document: skolemized.compact,
        deskolemized_quads,
        label_map,
        quads,
    })
}

fn partition(quads: &[String], selection: CanonicalSelection) -> GroupResult {
    let selected: HashSet<&str> = selection.quads.iter().map(String::as_str).collect();
    let mut result = GroupResult {
        deskolemized_quads: selection.deskolemized_quads,
        ..GroupResult::default()
    };
    for (index, quad) in quads.iter().enumerate() {
        if selected.contains(quad.as_str()) {
            result.matching.insert(index, quad.clone());
        } else {
            result.non_matching.insert(index, quad.clone());
        }
    }
    result
}
