//! # Skolemize / Deskolemize Subcommands
//!
//! Rewrite the blank nodes of an N-Quads file to `urn:<scheme>:` IRIs and
//! back. The scheme defaults to the configured one.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use vcsd_core::quad::join_quads;
use vcsd_disclosure::{deskolemize_quads, skolemize_quads};

use crate::config::CliConfig;

/// Arguments shared by `vcsd skolemize` and `vcsd deskolemize`.
#[derive(Args, Debug)]
pub struct SkolemArgs {
    /// URN scheme. Overrides the configured scheme.
    #[arg(long)]
    pub scheme: Option<String>,

    /// N-Quads input file.
    pub file: PathBuf,
}

impl SkolemArgs {
    fn scheme<'a>(&'a self, config: &'a CliConfig) -> &'a str {
        self.scheme.as_deref().unwrap_or(&config.urn_scheme)
    }
}

/// Skolemize the quads in `file`.
pub fn skolemize_file(file: &Path, scheme: &str) -> Result<String> {
    let quads = crate::read_quads(file)?;
    Ok(join_quads(&skolemize_quads(&quads, scheme)))
}

/// Deskolemize the quads in `file`.
pub fn deskolemize_file(file: &Path, scheme: &str) -> Result<String> {
    let quads = crate::read_quads(file)?;
    Ok(join_quads(&deskolemize_quads(&quads, scheme)))
}

/// Execute `vcsd skolemize`.
pub fn run_skolemize(args: &SkolemArgs, config: &CliConfig) -> Result<u8> {
    print!("{}", skolemize_file(&args.file, args.scheme(config))?);
    Ok(0)
}

/// Execute `vcsd deskolemize`.
pub fn run_deskolemize(args: &SkolemArgs, config: &CliConfig) -> Result<u8> {
    print!("{}", deskolemize_file(&args.file, args.scheme(config))?);
    Ok(0)
}
