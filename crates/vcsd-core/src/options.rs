//! # Engine Options
//!
//! Per-call configuration threaded through every disclosure operation.
//! Nothing here is global: each call receives its own options value and
//! the engine keeps no process-wide state.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::traits::DocumentLoader;

/// Default URN scheme used when skolemizing blank nodes.
pub const DEFAULT_URN_SCHEME: &str = "custom-scheme";

/// Default N-degree hashing budget per blank node.
pub const DEFAULT_MAX_ITERATIONS: u32 = 16;

/// Cancellation token polled by long-running collaborators.
///
/// Cloning shares the underlying flag; aborting any clone aborts them all.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    /// Create a signal that has not been aborted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`abort`](Self::abort) has been called on any clone.
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options passed to the document transformer.
#[derive(Clone, Default)]
pub struct TransformOptions {
    /// Loader for contexts referenced by URL. `None` means remote contexts
    /// cannot be resolved.
    pub document_loader: Option<Arc<dyn DocumentLoader>>,
    /// Base IRI for resolving relative references.
    pub base: Option<String>,
}

impl fmt::Debug for TransformOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformOptions")
            .field(
                "document_loader",
                &self.document_loader.as_ref().map(|_| "<loader>"),
            )
            .field("base", &self.base)
            .finish()
    }
}

/// Canonicalization algorithm requested from the canonicalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalizationAlgorithm {
    /// RDF Dataset Canonicalization 1.0.
    #[default]
    #[serde(rename = "RDFC-1.0")]
    Rdfc10,
}

impl CanonicalizationAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rdfc10 => "RDFC-1.0",
        }
    }
}

impl fmt::Display for CanonicalizationAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options passed to the canonicalizer.
#[derive(Debug, Clone)]
pub struct CanonicalizeOptions {
    /// Algorithm identifier.
    pub algorithm: CanonicalizationAlgorithm,
    /// Upper bound on the canonicalizer's iterative work. Exceeding it
    /// fails with [`DisclosureError::CanonicalizationLimit`](crate::DisclosureError::CanonicalizationLimit).
    pub max_iterations: u32,
    /// Cancellation token, polled between units of work.
    pub signal: Option<AbortSignal>,
}

impl Default for CanonicalizeOptions {
    fn default() -> Self {
        Self {
            algorithm: CanonicalizationAlgorithm::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            signal: None,
        }
    }
}

impl CanonicalizeOptions {
    /// Returns `true` if the attached signal (if any) has been aborted.
    pub fn is_aborted(&self) -> bool {
        self.signal.as_ref().is_some_and(AbortSignal::is_aborted)
    }
}

/// Options for a whole disclosure operation.
#[derive(Debug, Clone)]
pub struct DisclosureOptions {
    /// URN scheme used for skolemization.
    pub urn_scheme: String,
    /// Options forwarded to the document transformer.
    pub transform: TransformOptions,
    /// Options forwarded to the canonicalizer.
    pub canonicalize: CanonicalizeOptions,
}

impl Default for DisclosureOptions {
    fn default() -> Self {
        Self {
            urn_scheme: DEFAULT_URN_SCHEME.to_string(),
            transform: TransformOptions::default(),
            canonicalize: CanonicalizeOptions::default(),
        }
    }
}

impl DisclosureOptions {
    /// Replace the URN scheme.
    pub fn with_urn_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.urn_scheme = scheme.into();
        self
    }

    /// Attach a document loader.
    pub fn with_document_loader(mut self, loader: Arc<dyn DocumentLoader>) -> Self {
        self.transform.document_loader = Some(loader);
        self
    }

    /// Attach an abort signal.
    pub fn with_signal(mut self, signal: AbortSignal) -> Self {
        self.canonicalize.signal = Some(signal);
        self
    }
}
