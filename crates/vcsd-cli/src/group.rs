//! # Group Subcommand
//!
//! Canonicalizes a compact credential with HMAC-derived labels and prints
//! the canonical quads together with each group's matching and
//! non-matching indexes.
//!
//! Groups are given as `--group NAME=POINTER[,POINTER...]`. Repeating a
//! name appends to that group.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde_json::{json, Map, Value};

use vcsd_crypto::HmacLabelMapFactory;
use vcsd_disclosure::{canonicalize_and_group, GroupDefinitions, GroupedCanonicalization};
use vcsd_reference::{JsonLdTransformer, RdfcCanonicalizer};

use crate::config::CliConfig;

/// Arguments for `vcsd group`.
#[derive(Args, Debug)]
pub struct GroupArgs {
    /// Group definition, `NAME=POINTER[,POINTER...]`. Repeatable.
    #[arg(long = "group", short = 'g', value_parser = parse_group, allow_hyphen_values = true)]
    pub groups: Vec<(String, Vec<String>)>,

    /// Compact JSON-LD credential.
    pub file: PathBuf,
}

/// Parse one `NAME=POINTER[,POINTER...]` definition.
///
/// An empty pointer list (`NAME=`) defines a group that selects nothing.
pub fn parse_group(raw: &str) -> Result<(String, Vec<String>), String> {
    let (name, pointers) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=POINTERS, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("group name missing in {raw:?}"));
    }
    let pointers = if pointers.is_empty() {
        Vec::new()
    } else {
        pointers.split(',').map(str::to_string).collect()
    };
    Ok((name.to_string(), pointers))
}

/// Merge repeated `--group` arguments into definitions.
pub fn group_definitions(groups: &[(String, Vec<String>)]) -> Result<GroupDefinitions> {
    if groups.is_empty() {
        bail!("at least one --group is required");
    }
    let mut definitions = GroupDefinitions::new();
    for (name, pointers) in groups {
        definitions
            .entry(name.clone())
            .or_default()
            .extend(pointers.iter().cloned());
    }
    Ok(definitions)
}

/// Render a grouping as JSON.
pub fn grouping_json(grouped: &GroupedCanonicalization) -> Value {
    let groups: Map<String, Value> = grouped
        .groups
        .iter()
        .map(|(name, result)| {
            (
                name.clone(),
                json!({
                    "matching": result.matching_indexes(),
                    "nonMatching": result.non_matching_indexes(),
                }),
            )
        })
        .collect();
    json!({
        "quads": grouped.quads,
        "labelMap": grouped.label_map,
        "groups": groups,
    })
}

/// Execute `vcsd group`.
pub fn run_group(args: &GroupArgs, config: &CliConfig) -> Result<u8> {
    let document = crate::read_json(&args.file)?;
    let definitions = group_definitions(&args.groups)?;
    let options = config.disclosure_options()?;
    let factory = HmacLabelMapFactory::new(config.hmac_key()?);

    tracing::info!(groups = definitions.len(), file = %args.file.display(), "grouping credential");
    let grouped = crate::block_on(canonicalize_and_group(
        &JsonLdTransformer,
        &RdfcCanonicalizer,
        &document,
        &factory,
        &definitions,
        &options,
    ))??;

    crate::print_json(&grouping_json(&grouped))?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_group_definition() {
        assert_eq!(
            parse_group("mandatory=/issuer,/credentialSubject/name").unwrap(),
            (
                "mandatory".to_string(),
                vec!["/issuer".to_string(), "/credentialSubject/name".to_string()]
            )
        );
        assert_eq!(parse_group("empty=").unwrap(), ("empty".to_string(), vec![]));
        assert_eq!(parse_group("root=,/a").unwrap().1, vec!["".to_string(), "/a".to_string()]);
    }

    #[test]
    fn rejects_malformed_group() {
        assert!(parse_group("/issuer").is_err());
        assert!(parse_group("=/issuer").is_err());
    }

    #[test]
    fn repeated_names_merge() {
        let definitions = group_definitions(&[
            ("a".to_string(), vec!["/x".to_string()]),
            ("b".to_string(), vec![]),
            ("a".to_string(), vec!["/y".to_string()]),
        ])
        .unwrap();
        assert_eq!(definitions["a"], vec!["/x".to_string(), "/y".to_string()]);
        assert!(definitions["b"].is_empty());
    }

    #[test]
    fn no_groups_is_an_error() {
        assert!(group_definitions(&[]).is_err());
    }

    #[test]
    fn groups_a_credential_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cred.json");
        std::fs::write(
            &file,
            r#"{
                "@context": {"@vocab": "https://example.org/vocab#"},
                "@id": "urn:cred:1",
                "name": "Alice",
                "age": 42
            }"#,
        )
        .unwrap();
        let config = CliConfig {
            hmac_key_hex: Some("00".repeat(32)),
            ..CliConfig::default()
        };
        let args = GroupArgs {
            groups: vec![("name".to_string(), vec!["/name".to_string()])],
            file,
        };
        assert_eq!(run_group(&args, &config).unwrap(), 0);
    }
}
