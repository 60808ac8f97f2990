//! # CLI Configuration
//!
//! Settings come from an optional YAML file, then environment variables
//! override individual fields:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `VCSD_URN_SCHEME` | `urn_scheme` |
//! | `VCSD_HMAC_KEY_HEX` | `hmac_key_hex` |
//! | `VCSD_MAX_ITERATIONS` | `max_iterations` |
//!
//! ```yaml
//! urn_scheme: custom-scheme
//! max_iterations: 16
//! hmac_key_hex: 00112233...
//! contexts:
//!   https://www.w3.org/2018/credentials/v1: contexts/credentials-v1.json
//! ```
//!
//! ## Security Invariants
//!
//! - `Debug` never prints the HMAC key.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use vcsd_core::{DisclosureOptions, DEFAULT_MAX_ITERATIONS, DEFAULT_URN_SCHEME};
use vcsd_crypto::HmacSha256;
use vcsd_reference::StaticDocumentLoader;

/// Environment variable overriding the URN scheme.
pub const ENV_URN_SCHEME: &str = "VCSD_URN_SCHEME";
/// Environment variable carrying the hex-encoded HMAC key.
pub const ENV_HMAC_KEY_HEX: &str = "VCSD_HMAC_KEY_HEX";
/// Environment variable overriding the canonicalizer work bound.
pub const ENV_MAX_ITERATIONS: &str = "VCSD_MAX_ITERATIONS";

/// Configuration for the `vcsd` binary.
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// URN scheme used for skolemization.
    pub urn_scheme: String,
    /// Canonicalizer work bound.
    pub max_iterations: u32,
    /// Hex-encoded HMAC key for label derivation. A random key is
    /// generated per run when absent.
    pub hmac_key_hex: Option<String>,
    /// Context URL → local JSON file, served by the document loader.
    /// Relative paths resolve against the configuration file's directory.
    pub contexts: BTreeMap<String, PathBuf>,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("urn_scheme", &self.urn_scheme)
            .field("max_iterations", &self.max_iterations)
            .field(
                "hmac_key_hex",
                &self.hmac_key_hex.as_ref().map(|_| "[REDACTED]"),
            )
            .field("contexts", &self.contexts)
            .finish()
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            urn_scheme: DEFAULT_URN_SCHEME.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            hmac_key_hex: None,
            contexts: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    /// Load from `path` (if given) and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse a YAML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        if let Some(dir) = path.parent() {
            for file in config.contexts.values_mut() {
                if file.is_relative() {
                    *file = dir.join(&*file);
                }
            }
        }
        Ok(config)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(scheme) = lookup(ENV_URN_SCHEME) {
            self.urn_scheme = scheme;
        }
        if let Some(key) = lookup(ENV_HMAC_KEY_HEX) {
            self.hmac_key_hex = Some(key);
        }
        if let Some(raw) = lookup(ENV_MAX_ITERATIONS) {
            self.max_iterations = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_MAX_ITERATIONS} must be an integer, got {raw:?}"))?;
        }
        Ok(())
    }

    /// The HMAC key, or a fresh random one.
    pub fn hmac_key(&self) -> Result<HmacSha256> {
        match &self.hmac_key_hex {
            Some(hex) => HmacSha256::from_hex(hex).context("invalid HMAC key"),
            None => {
                tracing::warn!("no HMAC key configured; labels will not be reproducible");
                Ok(HmacSha256::generate())
            }
        }
    }

    /// Build a loader serving the configured context files.
    pub fn document_loader(&self) -> Result<StaticDocumentLoader> {
        let mut loader = StaticDocumentLoader::new();
        for (url, file) in &self.contexts {
            let document = crate::read_json(file)
                .with_context(|| format!("failed to load context for {url}"))?;
            loader.insert(url.clone(), document);
        }
        Ok(loader)
    }

    /// Library options for this configuration.
    pub fn disclosure_options(&self) -> Result<DisclosureOptions> {
        let mut options = DisclosureOptions::default()
            .with_urn_scheme(self.urn_scheme.clone())
            .with_document_loader(Arc::new(self.document_loader()?));
        options.canonicalize.max_iterations = self.max_iterations;
        Ok(options)
    }
}
