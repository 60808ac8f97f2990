//! # Label Replacement
//!
//! Canonicalization with each label-map factory, the totality of the
//! resulting label maps, and skolemization round trips at the quad level.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use vcsd_core::quad::blank_node_labels;
use vcsd_core::{DisclosureError, DisclosureOptions, ErrorKind, LabelMap, ProofGenerationError};
use vcsd_crypto::{
    HmacLabelMapFactory, HmacSha256, RandomShuffledLabelMapFactory, ShuffledLabelMapFactory,
};
use vcsd_disclosure::{
    deskolemize_quads, label_replacement_canonicalize_document,
    label_replacement_canonicalize_quads, relabel_quads, skolemize_compact_document,
    skolemize_quads, to_deskolemized_quads, StaticLabelMapFactory,
};
use vcsd_reference::{JsonLdTransformer, RdfcCanonicalizer, StaticDocumentLoader};

const CONTEXT_URL: &str = "https://example.org/contexts/credentials/v1";

fn options() -> DisclosureOptions {
    let context: Value =
        serde_json::from_str(include_str!("fixtures/credentials-v1.json")).unwrap();
    let loader = StaticDocumentLoader::new().with_document(CONTEXT_URL, context);
    DisclosureOptions::default().with_document_loader(Arc::new(loader))
}

fn driver_license() -> Value {
    serde_json::from_str(include_str!("fixtures/driver-license.json")).unwrap()
}

async fn deskolemized(document: &Value, options: &DisclosureOptions) -> Vec<String> {
    let skolemized = skolemize_compact_document(
        &JsonLdTransformer,
        document,
        &options.urn_scheme,
        None,
        &options.transform,
    )
    .await
    .unwrap();
    to_deskolemized_quads(
        &JsonLdTransformer,
        &skolemized.expanded,
        &options.urn_scheme,
        &options.transform,
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn hmac_labels_cover_every_blank_node() {
    let options = options();
    let quads = deskolemized(&driver_license(), &options).await;
    let out = label_replacement_canonicalize_quads(
        &RdfcCanonicalizer,
        &quads,
        &HmacLabelMapFactory::new(HmacSha256::new(b"label-key").unwrap()),
        &options.canonicalize,
    )
    .await
    .unwrap();

    let input_labels: BTreeSet<String> = quads
        .iter()
        .flat_map(|q| blank_node_labels(q))
        .map(str::to_string)
        .collect();
    let mapped: BTreeSet<String> = out.label_map.keys().cloned().collect();
    assert_eq!(input_labels, mapped);
    assert_eq!(input_labels.len(), 2);

    let mut relabeled = relabel_quads(&quads, &out.label_map).unwrap();
    relabeled.sort();
    assert_eq!(relabeled, out.canonical_quads);
}

#[tokio::test]
async fn incomplete_label_map_fails_relabeling() {
    let options = options();
    let quads = deskolemized(&driver_license(), &options).await;
    let out = label_replacement_canonicalize_quads(
        &RdfcCanonicalizer,
        &quads,
        &HmacLabelMapFactory::new(HmacSha256::new(b"label-key").unwrap()),
        &options.canonicalize,
    )
    .await
    .unwrap();

    let mut partial: LabelMap = out.label_map.clone();
    let dropped = partial.keys().next().unwrap().clone();
    partial.remove(&dropped);
    let err = relabel_quads(&quads, &partial).unwrap_err();
    assert!(matches!(
        err,
        DisclosureError::ProofGeneration(ProofGenerationError::MissingLabel { ref label })
            if *label == dropped
    ));
}

#[tokio::test]
async fn shuffled_labels_are_sequential() {
    let options = options();
    let out = label_replacement_canonicalize_document(
        &JsonLdTransformer,
        &RdfcCanonicalizer,
        &driver_license(),
        &ShuffledLabelMapFactory::new(HmacSha256::new(b"shuffle-key").unwrap()),
        &options,
    )
    .await
    .unwrap();
    let labels: BTreeSet<&str> = out.label_map.values().map(String::as_str).collect();
    assert_eq!(labels, BTreeSet::from(["b0", "b1"]));
}

#[tokio::test]
async fn random_shuffled_labels_are_a_permutation() {
    let options = options();
    let out = label_replacement_canonicalize_document(
        &JsonLdTransformer,
        &RdfcCanonicalizer,
        &driver_license(),
        &RandomShuffledLabelMapFactory::default(),
        &options,
    )
    .await
    .unwrap();
    let labels: BTreeSet<&str> = out.label_map.values().map(String::as_str).collect();
    assert_eq!(labels, BTreeSet::from(["b0", "b1"]));
}

#[tokio::test]
async fn static_labels_follow_canonical_ids() {
    let options = options();
    let by_canonical: LabelMap = [
        ("c14n0".to_string(), "first".to_string()),
        ("c14n1".to_string(), "second".to_string()),
    ]
    .into_iter()
    .collect();
    let out = label_replacement_canonicalize_document(
        &JsonLdTransformer,
        &RdfcCanonicalizer,
        &driver_license(),
        &StaticLabelMapFactory::new(&by_canonical),
        &options,
    )
    .await
    .unwrap();
    let labels: BTreeSet<&str> = out.label_map.values().map(String::as_str).collect();
    assert_eq!(labels, BTreeSet::from(["first", "second"]));
    assert!(out.canonical_quads.iter().any(|q| q.contains("_:first")));
}

#[tokio::test]
async fn static_map_missing_a_label_is_rejected() {
    let options = options();
    let by_canonical: LabelMap = [("c14n0".to_string(), "only".to_string())]
        .into_iter()
        .collect();
    let err = label_replacement_canonicalize_document(
        &JsonLdTransformer,
        &RdfcCanonicalizer,
        &driver_license(),
        &StaticLabelMapFactory::new(&by_canonical),
        &options,
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProofGeneration);
}

#[tokio::test]
async fn skolemized_quads_round_trip() {
    let options = options();
    let quads = deskolemized(&driver_license(), &options).await;
    assert!(quads.iter().any(|q| q.contains("_:")));
    let skolemized = skolemize_quads(&quads, &options.urn_scheme);
    assert!(skolemized.iter().all(|q| !q.contains("_:")));
    assert_eq!(deskolemize_quads(&skolemized, &options.urn_scheme), quads);
}
