//! # Label Replacement
//!
//! Canonicalizes a dataset and renames its blank nodes with labels chosen
//! by a [`LabelMapFactory`]. The factory sees only the canonical
//! identifiers, so the resulting labels depend on the graph and never on
//! how the issuer happened to name its blank nodes.
//!
//! The returned label map is keyed by the *input* blank-node identifiers
//! (without sigil). Those are the identifiers deskolemized selections carry,
//! so [`relabel_quads`](crate::relabel_quads) applies it to any subset of
//! the same dataset.

use vcsd_core::label_map::{ensure_total, strip_canonical_id_map};
use vcsd_core::quad::strip_blank_prefix;
use vcsd_core::{
    CanonicalizeOptions, Canonicalizer, DisclosureError, DisclosureOptions, DocumentTransformer,
    LabelMap, LabelMapFactory, ProofGenerationError,
};

use crate::relabel::relabel_quads;

/// Canonical quads with caller-chosen labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelReplacedQuads {
    /// Input blank-node identifier → final label.
    pub label_map: LabelMap,
    /// Canonical quads carrying the final labels, sorted.
    pub canonical_quads: Vec<String>,
}

/// Canonicalize `quads` and relabel the result through `factory`.
///
/// # Errors
///
/// Canonicalizer and factory errors pass through.
/// [`ProofGenerationError::MissingLabel`] or
/// [`ProofGenerationError::DuplicateLabel`] if the factory's map does not
/// cover every canonical blank node with distinct labels.
pub async fn label_replacement_canonicalize_quads<C, F>(
    canonicalizer: &C,
    quads: &[String],
    factory: &F,
    options: &CanonicalizeOptions,
) -> Result<LabelReplacedQuads, DisclosureError>
where
    C: Canonicalizer,
    F: LabelMapFactory,
{
    let dataset = canonicalizer.canonicalize(quads, options).await?;
    let canonical_id_map = strip_canonical_id_map(&dataset.canonical_id_map);
    let label_map = factory.create_label_map(&canonical_id_map).await?;
    ensure_total(&label_map, &canonical_id_map)?;

    let canonical_to_label: LabelMap = canonical_id_map
        .iter()
        .filter_map(|(input, canonical)| {
            label_map
                .get(input)
                .map(|label| (canonical.clone(), label.clone()))
        })
        .collect();
    let mut canonical_quads = relabel_quads(&dataset.quads, &canonical_to_label)?;
    canonical_quads.sort();

    tracing::debug!(
        quads = canonical_quads.len(),
        blank_nodes = label_map.len(),
        algorithm = %options.algorithm,
        "label replacement complete"
    );
    Ok(LabelReplacedQuads {
        label_map,
        canonical_quads,
    })
}

/// Convert `document` to quads, then run
/// [`label_replacement_canonicalize_quads`].
pub async fn label_replacement_canonicalize_document<T, C, F>(
    transformer: &T,
    canonicalizer: &C,
    document: &serde_json::Value,
    factory: &F,
    options: &DisclosureOptions,
) -> Result<LabelReplacedQuads, DisclosureError>
where
    T: DocumentTransformer,
    C: Canonicalizer,
    F: LabelMapFactory,
{
    let quads = transformer.to_quads(document, &options.transform).await?;
    label_replacement_canonicalize_quads(canonicalizer, &quads, factory, &options.canonicalize).await
}

/// Republishes a fixed canonical-label → label map under input identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLabelMapFactory {
    by_canonical: LabelMap,
}

impl StaticLabelMapFactory {
    /// Create a factory from a map keyed by canonical label. Sigils on
    /// either side are ignored.
    pub fn new(by_canonical: &LabelMap) -> Self {
        let by_canonical = by_canonical
            .iter()
            .map(|(k, v)| {
                (
                    strip_blank_prefix(k).to_string(),
                    strip_blank_prefix(v).to_string(),
                )
            })
            .collect();
        Self { by_canonical }
    }
}

impl LabelMapFactory for StaticLabelMapFactory {
    async fn create_label_map(
        &self,
        canonical_id_map: &LabelMap,
    ) -> Result<LabelMap, DisclosureError> {
        canonical_id_map
            .iter()
            .map(|(input, canonical)| match self.by_canonical.get(canonical) {
                Some(label) => Ok((input.clone(), label.clone())),
                None => Err(ProofGenerationError::MissingLabel {
                    label: canonical.clone(),
                }
                .into()),
            })
            .collect()
    }
}
