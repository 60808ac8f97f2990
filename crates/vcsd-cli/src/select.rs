//! # Select Subcommand
//!
//! Prints the selection document a set of JSON pointers produces for a
//! compact credential, or `null` when no pointers are given.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use vcsd_disclosure::{select_document_with_options, SelectOptions};

/// Arguments for `vcsd select`.
#[derive(Args, Debug)]
pub struct SelectArgs {
    /// JSON pointer to select. Repeatable.
    #[arg(long = "pointer", short = 'p', allow_hyphen_values = true)]
    pub pointers: Vec<String>,

    /// Do not copy `type` into nodes on selected paths.
    #[arg(long)]
    pub no_types: bool,

    /// Compact JSON-LD credential.
    pub file: PathBuf,
}

/// Execute `vcsd select`.
pub fn run_select(args: &SelectArgs) -> Result<u8> {
    let document = crate::read_json(&args.file)?;
    let options = SelectOptions {
        include_types: !args.no_types,
    };
    let selection = select_document_with_options(&args.pointers, &document, &options)?;
    crate::print_json(&selection.unwrap_or(Value::Null))?;
    Ok(0)
}
