//! # Disclose Subcommand
//!
//! Plans a selective disclosure of a compact credential and prints the
//! mandatory hash, index lists, reveal document, and verifier label map.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::{json, Value};

use vcsd_crypto::{to_hex, HmacLabelMapFactory, Sha256Hasher};
use vcsd_disclosure::{hash_mandatory_quads, plan_disclosure, DisclosurePlan};
use vcsd_reference::{JsonLdTransformer, RdfcCanonicalizer};

use crate::config::CliConfig;

/// Arguments for `vcsd disclose`.
#[derive(Args, Debug)]
pub struct DiscloseArgs {
    /// Pointer the issuer requires to be revealed. Repeatable.
    #[arg(long = "mandatory", short = 'm', allow_hyphen_values = true)]
    pub mandatory: Vec<String>,

    /// Pointer the holder chooses to reveal. Repeatable.
    #[arg(long = "selective", short = 's', allow_hyphen_values = true)]
    pub selective: Vec<String>,

    /// Compact JSON-LD credential.
    pub file: PathBuf,
}

/// Render a plan and its mandatory digest as JSON.
pub fn plan_json(plan: &DisclosurePlan, mandatory_hash: &[u8]) -> Value {
    json!({
        "mandatoryHash": to_hex(mandatory_hash),
        "mandatoryIndexes": plan.mandatory_indexes,
        "selectiveIndexes": plan.selective_indexes,
        "revealDocument": plan.reveal_document.clone().unwrap_or(Value::Null),
        "verifierLabelMap": plan.verifier_label_map,
    })
}

/// Execute `vcsd disclose`.
pub fn run_disclose(args: &DiscloseArgs, config: &CliConfig) -> Result<u8> {
    let document = crate::read_json(&args.file)?;
    let options = config.disclosure_options()?;
    let factory = HmacLabelMapFactory::new(config.hmac_key()?);

    tracing::info!(
        mandatory = args.mandatory.len(),
        selective = args.selective.len(),
        "planning disclosure"
    );
    let output = crate::block_on(async {
        let plan = plan_disclosure(
            &JsonLdTransformer,
            &RdfcCanonicalizer,
            &document,
            &factory,
            &args.mandatory,
            &args.selective,
            &options,
        )
        .await?;
        let digest = hash_mandatory_quads(&plan.mandatory_quads, &Sha256Hasher).await?;
        Ok::<_, vcsd_core::DisclosureError>(plan_json(&plan, &digest))
    })??;

    crate::print_json(&output)?;
    Ok(0)
}
