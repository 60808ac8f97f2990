//! # RDFC-1.0 Canonicalizer
//!
//! Adapter over `rdf-canon`. Quad lines are parsed into an `oxrdf`
//! dataset, every blank node is issued a canonical identifier
//! (`c14n0`, `c14n1`, …), and the relabeled dataset is written back in
//! canonical N-Quads, sorted by code point.
//!
//! ## Security Invariants
//!
//! - Canonical labels depend only on the dataset: neither statement order
//!   nor input blank-node names can change the output.
//! - `max_iterations` is the Hash N-Degree Quads budget per blank node.
//!   Exceeding it fails with [`DisclosureError::CanonicalizationLimit`];
//!   there is no fallback labeling.
//! - The abort signal is polled before parsing and again before relabeling.
//!   The issuing pass between them is bounded by the call budget.

use std::collections::BTreeSet;

use rdf_canon::{CanonicalizationError, CanonicalizationOptions};
use sha2::Sha256;
use vcsd_core::quad::{blank_node_labels, BLANK_NODE_PREFIX};
use vcsd_core::{
    CanonicalizeOptions, CanonicalizedDataset, Canonicalizer, DisclosureError, LabelMap,
};

use crate::nquads;

/// Label prefix issued to canonical blank nodes.
pub const CANONICAL_PREFIX: &str = "c14n";

/// RDFC-1.0 canonicalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RdfcCanonicalizer;

impl Canonicalizer for RdfcCanonicalizer {
    async fn canonicalize(
        &self,
        quads: &[String],
        options: &CanonicalizeOptions,
    ) -> Result<CanonicalizedDataset, DisclosureError> {
        canonicalize_quads(quads, options)
    }
}

/// Synchronous form of [`RdfcCanonicalizer::canonicalize`].
pub fn canonicalize_quads(
    quads: &[String],
    options: &CanonicalizeOptions,
) -> Result<CanonicalizedDataset, DisclosureError> {
    if options.is_aborted() {
        return Err(DisclosureError::Aborted);
    }

    let dataset = nquads::parse_dataset(quads)?;
    let blank_nodes: BTreeSet<&str> = quads.iter().flat_map(|q| blank_node_labels(q)).collect();
    let call_limit = blank_nodes
        .len()
        .saturating_mul(options.max_iterations as usize);

    let issued = rdf_canon::issue_with::<Sha256>(
        &dataset,
        &CanonicalizationOptions {
            hndq_call_limit: Some(call_limit),
        },
    )
    .map_err(|e| canonicalization_error(e, blank_nodes.len(), options.max_iterations))?;

    if options.is_aborted() {
        return Err(DisclosureError::Aborted);
    }

    let relabeled = rdf_canon::relabel(&dataset, &issued)
        .map_err(|e| canonicalization_error(e, blank_nodes.len(), options.max_iterations))?;
    let mut canonical_quads: Vec<String> = relabeled.iter().map(nquads::write_quad).collect();
    canonical_quads.sort();

    let canonical_id_map: LabelMap = issued
        .into_iter()
        .map(|(input, canonical)| {
            (
                format!("{BLANK_NODE_PREFIX}{input}"),
                format!("{BLANK_NODE_PREFIX}{canonical}"),
            )
        })
        .collect();

    tracing::debug!(
        algorithm = %options.algorithm,
        quads = canonical_quads.len(),
        blank_nodes = canonical_id_map.len(),
        "canonicalized dataset"
    );

    Ok(CanonicalizedDataset {
        quads: canonical_quads,
        canonical_id_map,
    })
}

fn canonicalization_error(
    error: CanonicalizationError,
    blank_nodes: usize,
    max_iterations: u32,
) -> DisclosureError {
    match error {
        CanonicalizationError::HndqCallLimitExceeded(limit) => {
            DisclosureError::CanonicalizationLimit(format!(
                "{blank_nodes} blank nodes need more than {limit} N-degree hash calls \
                 ({max_iterations} per blank node)"
            ))
        }
        other => DisclosureError::InvalidDocument(format!("canonicalization failed: {other}")),
    }
}
