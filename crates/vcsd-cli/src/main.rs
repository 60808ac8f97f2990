//! # vcsd CLI entry point
//!
//! Parses command-line arguments, loads configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vcsd_cli::config::CliConfig;
use vcsd_cli::disclose::{run_disclose, DiscloseArgs};
use vcsd_cli::group::{run_group, GroupArgs};
use vcsd_cli::hash::{run_hash_mandatory, HashMandatoryArgs};
use vcsd_cli::pointer::{run_pointer, PointerArgs};
use vcsd_cli::select::{run_select, SelectArgs};
use vcsd_cli::skolem::{run_deskolemize, run_skolemize, SkolemArgs};

/// Selective-disclosure toolkit for data-integrity credentials.
///
/// Skolemizes, canonicalizes, selects, and groups the statements of a
/// JSON-LD credential, and plans mandatory/selective disclosures.
#[derive(Parser, Debug)]
#[command(name = "vcsd", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a JSON pointer into path segments.
    Pointer(PointerArgs),

    /// Print the selection document for a set of JSON pointers.
    Select(SelectArgs),

    /// Replace blank nodes in an N-Quads file with skolem URNs.
    Skolemize(SkolemArgs),

    /// Turn skolem URNs in an N-Quads file back into blank nodes.
    Deskolemize(SkolemArgs),

    /// SHA-256 of the quads in an N-Quads file.
    HashMandatory(HashMandatoryArgs),

    /// Canonicalize a credential and partition its quads per group.
    Group(GroupArgs),

    /// Plan a mandatory/selective disclosure of a credential.
    Disclose(DiscloseArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("vcsd CLI starting");

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "loaded configuration");

    let result = match cli.command {
        Commands::Pointer(args) => run_pointer(&args),
        Commands::Select(args) => run_select(&args),
        Commands::Skolemize(args) => run_skolemize(&args, &config),
        Commands::Deskolemize(args) => run_deskolemize(&args, &config),
        Commands::HashMandatory(args) => run_hash_mandatory(&args),
        Commands::Group(args) => run_group(&args, &config),
        Commands::Disclose(args) => run_disclose(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_pointer() {
        let cli = Cli::try_parse_from(["vcsd", "pointer", "/credentialSubject/0"]).unwrap();
        if let Commands::Pointer(args) = cli.command {
            assert_eq!(args.pointer, "/credentialSubject/0");
        } else {
            panic!("expected pointer command");
        }
    }

    #[test]
    fn cli_parse_select_multiple_pointers() {
        let cli = Cli::try_parse_from([
            "vcsd",
            "select",
            "--pointer",
            "/issuer",
            "-p",
            "/credentialSubject/name",
            "--no-types",
            "cred.json",
        ])
        .unwrap();
        if let Commands::Select(args) = cli.command {
            assert_eq!(args.pointers, vec!["/issuer", "/credentialSubject/name"]);
            assert!(args.no_types);
            assert_eq!(args.file, PathBuf::from("cred.json"));
        } else {
            panic!("expected select command");
        }
    }

    #[test]
    fn cli_parse_skolemize_with_scheme() {
        let cli =
            Cli::try_parse_from(["vcsd", "skolemize", "--scheme", "example", "in.nq"]).unwrap();
        if let Commands::Skolemize(args) = cli.command {
            assert_eq!(args.scheme.as_deref(), Some("example"));
        } else {
            panic!("expected skolemize command");
        }
    }

    #[test]
    fn cli_parse_hash_mandatory() {
        let cli = Cli::try_parse_from(["vcsd", "hash-mandatory", "m.nq"]).unwrap();
        assert!(matches!(cli.command, Commands::HashMandatory(_)));
    }

    #[test]
    fn cli_parse_group_definitions() {
        let cli = Cli::try_parse_from([
            "vcsd",
            "group",
            "--group",
            "mandatory=/issuer",
            "-g",
            "selective=/credentialSubject/name,/credentialSubject/age",
            "cred.json",
        ])
        .unwrap();
        if let Commands::Group(args) = cli.command {
            assert_eq!(args.groups.len(), 2);
            assert_eq!(args.groups[1].1.len(), 2);
        } else {
            panic!("expected group command");
        }
    }

    #[test]
    fn cli_parse_group_rejects_bad_definition() {
        assert!(Cli::try_parse_from(["vcsd", "group", "--group", "/issuer", "cred.json"]).is_err());
    }

    #[test]
    fn cli_parse_disclose_with_global_flags() {
        let cli = Cli::try_parse_from([
            "vcsd",
            "-vv",
            "--config",
            "vcsd.yaml",
            "disclose",
            "-m",
            "/issuer",
            "-s",
            "/credentialSubject/name",
            "cred.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("vcsd.yaml")));
        if let Commands::Disclose(args) = cli.command {
            assert_eq!(args.mandatory, vec!["/issuer"]);
            assert_eq!(args.selective, vec!["/credentialSubject/name"]);
        } else {
            panic!("expected disclose command");
        }
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["vcsd"]).is_err());
    }
}
