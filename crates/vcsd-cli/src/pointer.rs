//! # Pointer Subcommand
//!
//! Prints the path segments of a JSON pointer as a JSON array: indices as
//! numbers, keys as strings.

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use vcsd_core::json_pointer_to_paths;
use vcsd_disclosure::paths_to_json;

/// Arguments for `vcsd pointer`.
#[derive(Args, Debug)]
pub struct PointerArgs {
    /// JSON pointer, e.g. `/credentialSubject/degrees/0`.
    #[arg(allow_hyphen_values = true)]
    pub pointer: String,
}

/// Parse `pointer` into a JSON array of segments.
pub fn pointer_segments(pointer: &str) -> Result<Value> {
    let paths = json_pointer_to_paths(pointer)?;
    Ok(paths_to_json(&paths)?)
}

/// Execute `vcsd pointer`.
pub fn run_pointer(args: &PointerArgs) -> Result<u8> {
    crate::print_json(&pointer_segments(&args.pointer)?)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn segments_as_json() {
        assert_eq!(
            pointer_segments("/credentialSubject/a~1b/3").unwrap(),
            json!(["credentialSubject", "a/b", 3])
        );
        assert_eq!(pointer_segments("").unwrap(), json!([]));
    }

    #[test]
    fn malformed_pointer_fails() {
        assert!(pointer_segments("no-slash").is_err());
        assert!(pointer_segments("/bad~2").is_err());
    }
}
