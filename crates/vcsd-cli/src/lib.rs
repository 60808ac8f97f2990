//! # vcsd-cli — Selective-Disclosure Command-Line Interface
//!
//! Provides the `vcsd` binary, a thin front end over `vcsd-disclosure`
//! wired to the collaborator adapters from `vcsd-reference`.
//!
//! ## Subcommands
//!
//! - `vcsd pointer`: Parse a JSON pointer into path segments.
//! - `vcsd select`: Build the selection document for a set of pointers.
//! - `vcsd skolemize` / `vcsd deskolemize`: Rewrite an N-Quads file.
//! - `vcsd hash-mandatory`: SHA-256 of an N-Quads file, in file order.
//! - `vcsd group`: Canonicalize a credential and partition its quads per
//!   pointer group.
//! - `vcsd disclose`: Plan a mandatory/selective disclosure.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; all disclosure logic lives in the
//!   library crates.
//! - Handlers return `anyhow::Result<u8>`, the process exit code.

pub mod config;
pub mod disclose;
pub mod group;
pub mod hash;
pub mod pointer;
pub mod select;
pub mod skolem;

use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use vcsd_core::quad::split_quads;

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse JSON in {}", path.display()))
}

/// Read an N-Quads file into newline-terminated quad lines.
pub fn read_quads(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(split_quads(&content))
}

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Drive a future to completion on a single-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(future))
}
