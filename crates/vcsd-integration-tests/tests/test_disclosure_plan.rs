//! # Disclosure Planning
//!
//! Plans mandatory and selective disclosures of a driver-license credential
//! and checks what the verifier would receive: the reveal document, the
//! mandatory hash input, and a label map that lets the verifier rebuild the
//! holder's labels from its own canonicalization.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::{json, Value};
use vcsd_core::{Canonicalizer, DisclosureOptions, DocumentTransformer};
use vcsd_crypto::{to_hex, HmacLabelMapFactory, HmacSha256, Sha256Hasher};
use vcsd_disclosure::{
    hash_mandatory_quads, plan_disclosure, relabel_quads, DisclosurePlan, COMBINED_GROUP,
    MANDATORY_GROUP,
};
use vcsd_reference::{JsonLdTransformer, RdfcCanonicalizer, StaticDocumentLoader};

const CONTEXT_URL: &str = "https://example.org/contexts/credentials/v1";

fn options() -> DisclosureOptions {
    let context: Value =
        serde_json::from_str(include_str!("fixtures/credentials-v1.json")).unwrap();
    let loader = StaticDocumentLoader::new().with_document(CONTEXT_URL, context);
    DisclosureOptions::default().with_document_loader(Arc::new(loader))
}

fn strings(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|p| p.to_string()).collect()
}

async fn plan(mandatory: &[&str], selective: &[&str]) -> DisclosurePlan {
    let document: Value =
        serde_json::from_str(include_str!("fixtures/driver-license.json")).unwrap();
    plan_disclosure(
        &JsonLdTransformer,
        &RdfcCanonicalizer,
        &document,
        &HmacLabelMapFactory::new(HmacSha256::new(b"holder-key").unwrap()),
        &strings(mandatory),
        &strings(selective),
        &options(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn issuer_mandatory_birth_date_selective() {
    let plan = plan(&["/issuer"], &["/credentialSubject/driverLicense/dateOfBirth"]).await;

    assert_eq!(plan.mandatory_quads.len(), 3);
    assert_eq!(plan.mandatory_indexes.len(), 3);
    // Subject link, license link, license type, birth date. The root type
    // statements are already mandatory.
    assert_eq!(plan.selective_indexes.len(), 4);

    assert_eq!(
        plan.reveal_document.as_ref().unwrap(),
        &json!({
            "@context": CONTEXT_URL,
            "id": "urn:uuid:36245ee9-9074-4b05-a777-febff2e69757",
            "type": ["VerifiableCredential", "DriverLicenseCredential"],
            "issuer": "https://example.org/issuers/14",
            "credentialSubject": {
                "driverLicense": {
                    "type": "Iso18013DriversLicense",
                    "dateOfBirth": "1990-01-01"
                }
            }
        })
    );
}

#[tokio::test]
async fn verifier_rebuilds_holder_quads_from_reveal_document() {
    let plan = plan(&["/issuer"], &["/credentialSubject/driverLicense/dateOfBirth"]).await;
    let options = options();

    let revealed = JsonLdTransformer
        .to_quads(plan.reveal_document.as_ref().unwrap(), &options.transform)
        .await
        .unwrap();
    let verifier = RdfcCanonicalizer
        .canonicalize(&revealed, &options.canonicalize)
        .await
        .unwrap();
    let mut rebuilt = relabel_quads(&verifier.quads, &plan.verifier_label_map).unwrap();
    rebuilt.sort();

    let combined = plan.grouped.group(COMBINED_GROUP).unwrap();
    assert_eq!(rebuilt, combined.matching_quads());
    assert_eq!(plan.verifier_label_map.len(), 2);

    let holder_labels: BTreeSet<&String> = plan.grouped.label_map.values().collect();
    assert!(plan
        .verifier_label_map
        .values()
        .all(|label| holder_labels.contains(label)));
}

#[tokio::test]
async fn mandatory_hash_covers_mandatory_quads_in_order() {
    let plan = plan(&["/issuer", "/issuanceDate"], &[]).await;
    let digest = hash_mandatory_quads(&plan.mandatory_quads, &Sha256Hasher)
        .await
        .unwrap();
    assert_eq!(digest, Sha256Hasher::digest(plan.mandatory_quads.concat().as_bytes()).to_vec());
    assert_eq!(to_hex(&digest).len(), 64);

    let mandatory = plan.grouped.group(MANDATORY_GROUP).unwrap();
    assert_eq!(plan.mandatory_quads, mandatory.matching_quads());
    assert!(plan.selective_indexes.is_empty());
    assert_eq!(plan.mandatory_indexes, (0..plan.mandatory_quads.len()).collect::<Vec<_>>());
}

#[tokio::test]
async fn selective_overlap_with_mandatory_is_not_counted_twice() {
    let plan = plan(&["/issuer"], &["/issuer"]).await;
    assert!(plan.selective_indexes.is_empty());
    assert_eq!(plan.mandatory_indexes, vec![0, 1, 2]);
}

#[tokio::test]
async fn holder_labels_do_not_depend_on_disclosure() {
    let narrow = plan(&["/issuer"], &[]).await;
    let wide = plan(&["/issuer"], &["/credentialSubject"]).await;
    assert_eq!(narrow.grouped.quads, wide.grouped.quads);
}
