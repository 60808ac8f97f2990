//! # Skolemization
//!
//! Blank nodes have no stable names across serializations, so they cannot
//! be addressed by pointer selection. Skolemization replaces each one with
//! a URN of the form `urn:<scheme>:<label>`; deskolemization turns those
//! URNs back into blank nodes after conversion to quads.
//!
//! Labels are either a preserved blank-node identifier (`_:b3` →
//! `urn:<scheme>:b3`) or, for nodes with no identifier at all, a
//! synthesized `_<seed>_<counter>`. The seed and counter live in a
//! [`SkolemContext`] owned by one call.
//!
//! ## Security Invariants
//!
//! - `deskolemize_quads(skolemize_quads(q, s), s) == q` for every `q`
//!   whose IRIs do not already use the `urn:<s>:` prefix.
//! - Quoted literals are never rewritten.

use std::convert::Infallible;

use serde_json::{Map, Value};
use vcsd_core::quad::{rewrite_blank_nodes, rewrite_iris, BLANK_NODE_PREFIX};
use vcsd_core::{DisclosureError, DocumentTransformer, TransformOptions};

/// Per-call skolemization state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkolemContext {
    urn_scheme: String,
    random_seed: String,
    counter: u64,
}

impl SkolemContext {
    /// Create a context with an explicit seed. Useful for reproducible
    /// output.
    pub fn new(urn_scheme: impl Into<String>, random_seed: impl Into<String>) -> Self {
        Self {
            urn_scheme: urn_scheme.into(),
            random_seed: random_seed.into(),
            counter: 0,
        }
    }

    /// Create a context seeded with a fresh UUIDv4.
    pub fn with_random_seed(urn_scheme: impl Into<String>) -> Self {
        Self::new(urn_scheme, uuid::Uuid::new_v4().simple().to_string())
    }

    /// The URN scheme.
    pub fn urn_scheme(&self) -> &str {
        &self.urn_scheme
    }

    /// The seed used for synthesized labels.
    pub fn random_seed(&self) -> &str {
        &self.random_seed
    }

    /// Number of identifiers synthesized so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    fn synthesize(&mut self) -> String {
        let id = format!(
            "urn:{}:_{}_{}",
            self.urn_scheme, self.random_seed, self.counter
        );
        self.counter += 1;
        id
    }

    fn skolem_iri(&self, label: &str) -> String {
        format!("urn:{}:{label}", self.urn_scheme)
    }
}

/// A compact document and its expanded form, both with every node named.
#[derive(Debug, Clone, PartialEq)]
pub struct SkolemizedDocument {
    /// Expanded form.
    pub expanded: Value,
    /// Compact form, re-compacted with the source document's `@context`.
    pub compact: Value,
}

/// Replace every blank-node token `_:<id>` with `<urn:<scheme>:<id>>`.
pub fn skolemize_quads(quads: &[String], urn_scheme: &str) -> Vec<String> {
    quads
        .iter()
        .map(|quad| {
            let rewritten = rewrite_blank_nodes::<Infallible>(quad, |label| {
                Ok(format!("<urn:{urn_scheme}:{label}>"))
            });
            match rewritten {
                Ok(line) => line,
                Err(never) => match never {},
            }
        })
        .collect()
}

/// Replace every `<urn:<scheme>:<id>>` with `_:<id>`. Other IRIs are
/// untouched.
pub fn deskolemize_quads(quads: &[String], urn_scheme: &str) -> Vec<String> {
    let prefix = format!("urn:{urn_scheme}:");
    quads
        .iter()
        .map(|quad| {
            rewrite_iris(quad, |iri| {
                iri.strip_prefix(prefix.as_str())
                    .filter(|label| !label.is_empty())
                    .map(|label| format!("{BLANK_NODE_PREFIX}{label}"))
            })
        })
        .collect()
}

/// Give every node object of an expanded document a URN identifier.
///
/// Value objects are left alone. `@set` objects are walked but never
/// receive an identifier.
///
/// # Errors
///
/// - [`DisclosureError::InvalidIdentifier`] for a non-string `@id`.
/// - [`DisclosureError::InvalidDocument`] for a `@list` object. RDF
///   serialization gives every list cell a fresh blank node that no `@id`
///   can name, so list members could never be matched by selection.
pub fn skolemize_expanded_document(
    expanded: &Value,
    context: &mut SkolemContext,
) -> Result<Value, DisclosureError> {
    match expanded {
        Value::Array(items) => items
            .iter()
            .map(|item| skolemize_element(item, context))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        single => skolemize_element(single, context),
    }
}

fn skolemize_element(element: &Value, context: &mut SkolemContext) -> Result<Value, DisclosureError> {
    let Value::Object(object) = element else {
        return Ok(element.clone());
    };
    if object.contains_key("@value") {
        return Ok(element.clone());
    }
    if object.contains_key("@list") {
        return Err(DisclosureError::InvalidDocument(
            "@list values cannot be skolemized".to_string(),
        ));
    }

    let mut node = Map::new();
    for (property, value) in object {
        let walked = match value {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| skolemize_element(item, context))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            single => skolemize_element(single, context)?,
        };
        node.insert(property.clone(), walked);
    }

    if object.contains_key("@set") {
        return Ok(Value::Object(node));
    }

    match node.get("@id") {
        None => {
            let id = context.synthesize();
            node.insert("@id".to_string(), Value::String(id));
        }
        Some(Value::String(id)) => {
            if let Some(label) = id.strip_prefix(BLANK_NODE_PREFIX) {
                let iri = context.skolem_iri(label);
                node.insert("@id".to_string(), Value::String(iri));
            }
        }
        Some(other) => {
            return Err(DisclosureError::InvalidIdentifier(format!(
                "@id must be a string, got {other}"
            )))
        }
    }
    Ok(Value::Object(node))
}

/// Skolemize a compact document.
///
/// Expands `document`, names every node, and compacts the result with the
/// document's own top-level `@context`. `random_seed` defaults to a fresh
/// UUIDv4.
///
/// # Errors
///
/// [`DisclosureError::InvalidContext`] if `document` has no top-level
/// `@context`; transformer errors pass through.
pub async fn skolemize_compact_document<T: DocumentTransformer>(
    transformer: &T,
    document: &Value,
    urn_scheme: &str,
    random_seed: Option<&str>,
    options: &TransformOptions,
) -> Result<SkolemizedDocument, DisclosureError> {
    let context = match document {
        Value::Object(object) => object.get("@context").ok_or_else(|| {
            DisclosureError::InvalidContext("document has no top-level @context".to_string())
        })?,
        _ => {
            return Err(DisclosureError::InvalidContext(
                "document must be a single object with one top-level @context".to_string(),
            ))
        }
    };

    let mut skolem = match random_seed {
        Some(seed) => SkolemContext::new(urn_scheme, seed),
        None => SkolemContext::with_random_seed(urn_scheme),
    };

    let expanded = transformer.expand(document, options).await?;
    let expanded = skolemize_expanded_document(&expanded, &mut skolem)?;
    let compact = transformer.compact(&expanded, context, options).await?;
    tracing::debug!(
        urn_scheme,
        synthesized = skolem.counter(),
        "skolemized compact document"
    );
    Ok(SkolemizedDocument { expanded, compact })
}

/// Convert a skolemized document to quads and deskolemize them.
pub async fn to_deskolemized_quads<T: DocumentTransformer>(
    transformer: &T,
    document: &Value,
    urn_scheme: &str,
    options: &TransformOptions,
) -> Result<Vec<String>, DisclosureError> {
    let quads = transformer.to_quads(document, options).await?;
    Ok(deskolemize_quads(&quads, urn_scheme))
}
