//! # Hash-Mandatory Subcommand
//!
//! SHA-256 over the quads of an N-Quads file, in file order, printed as
//! lowercase hex.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use vcsd_crypto::{to_hex, Sha256Hasher};
use vcsd_disclosure::hash_mandatory_quads;

/// Arguments for `vcsd hash-mandatory`.
#[derive(Args, Debug)]
pub struct HashMandatoryArgs {
    /// N-Quads file holding the mandatory quads.
    pub file: PathBuf,
}

/// Hex digest of the quads in `file`.
pub fn hash_file(file: &Path) -> Result<String> {
    let quads = crate::read_quads(file)?;
    let digest = crate::block_on(hash_mandatory_quads(&quads, &Sha256Hasher))??;
    Ok(to_hex(&digest))
}

/// Execute `vcsd hash-mandatory`.
pub fn run_hash_mandatory(args: &HashMandatoryArgs) -> Result<u8> {
    println!("{}", hash_file(&args.file)?);
    Ok(0)
}
