//! # Collaborator Traits
//!
//! The engine consumes, and never reimplements, the linked-data document
//! transformer and the dataset canonicalizer. Both are injected through the
//! traits below, together with the caller-supplied strategies: document
//! loader, hasher, and label-map factory.
//!
//! Every method is `async`: calls into collaborators are the engine's only
//! suspension points. There are no implicit timeouts; cancellation is the
//! caller's [`AbortSignal`](crate::AbortSignal).

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::DisclosureError;
use crate::label_map::LabelMap;
use crate::options::{CanonicalizeOptions, TransformOptions};

/// Resolves documents (usually `@context` documents) referenced by URL.
///
/// Object-safe so it can travel inside [`TransformOptions`]. Failures are
/// surfaced to the caller as-is; the engine never retries a load.
pub trait DocumentLoader: Send + Sync {
    /// Fetch the document at `url`.
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, DisclosureError>>;
}

/// Expands, compacts, and serializes linked-data documents.
pub trait DocumentTransformer {
    /// Expand a compact document. The result uses full IRIs and wraps every
    /// property value in an array.
    #[allow(async_fn_in_trait)]
    async fn expand(
        &self,
        document: &Value,
        options: &TransformOptions,
    ) -> Result<Value, DisclosureError>;

    /// Compact an expanded document against `context`.
    #[allow(async_fn_in_trait)]
    async fn compact(
        &self,
        expanded: &Value,
        context: &Value,
        options: &TransformOptions,
    ) -> Result<Value, DisclosureError>;

    /// Serialize a (compact or expanded) document to N-Quads lines, each
    /// terminated by `\n`.
    #[allow(async_fn_in_trait)]
    async fn to_quads(
        &self,
        document: &Value,
        options: &TransformOptions,
    ) -> Result<Vec<String>, DisclosureError>;
}

/// Output of a canonicalization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalizedDataset {
    /// Canonical quad lines, blank nodes carrying canonical labels.
    pub quads: Vec<String>,
    /// Input blank-node identifier → canonical identifier, both with their
    /// `_:` sigil (e.g. `_:b0` → `_:c14n0`).
    pub canonical_id_map: LabelMap,
}

/// Assigns isomorphism-stable identifiers to the blank nodes of a dataset.
pub trait Canonicalizer {
    /// Canonicalize `quads`.
    ///
    /// Implementations must poll `options.signal` and fail with
    /// [`DisclosureError::Aborted`] once it is raised, and must fail with
    /// [`DisclosureError::CanonicalizationLimit`] instead of exceeding
    /// `options.max_iterations`.
    #[allow(async_fn_in_trait)]
    async fn canonicalize(
        &self,
        quads: &[String],
        options: &CanonicalizeOptions,
    ) -> Result<CanonicalizedDataset, DisclosureError>;
}

/// A (possibly keyed) hash function: bytes in, digest bytes out.
///
/// Key material, if any, is owned by the implementation and opaque to the
/// engine.
pub trait Hasher {
    /// Digest `data`.
    #[allow(async_fn_in_trait)]
    async fn hash(&self, data: &[u8]) -> Result<Vec<u8>, DisclosureError>;
}

/// Produces the final label map from a canonical-identifier map.
///
/// The input map is keyed by input blank-node identifier and valued by
/// canonical identifier, both without their `_:` sigil. The output must be
/// keyed by the same input identifiers.
pub trait LabelMapFactory {
    /// Build the label map.
    #[allow(async_fn_in_trait)]
    async fn create_label_map(&self, canonical_id_map: &LabelMap)
        -> Result<LabelMap, DisclosureError>;
}
