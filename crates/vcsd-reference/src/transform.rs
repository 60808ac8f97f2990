//! # JSON-LD Transformer
//!
//! [`DocumentTransformer`] over the `json-ld` crate. Documents cross the
//! boundary as `serde_json` values and are converted through
//! `json-syntax`. Remote contexts resolve through the caller's
//! [`DocumentLoader`](vcsd_core::DocumentLoader) only; with none
//! configured, a remote context is a load error.
//!
//! Quads leave through [`nquads::normalize`], so their spelling matches the
//! canonicalizer's output.

use json_ld::rdf_types::generator;
use json_ld::syntax::{IntoJsonWithContext, TryFromJson};
use json_ld::{IriBuf, JsonLdProcessor, RemoteContextReference, RemoteDocument};
use serde_json::Value;
use vcsd_core::{DisclosureError, DocumentTransformer, TransformOptions};

use crate::loader::LoaderBridge;
use crate::nquads;

/// Prefix of blank-node labels minted during RDF serialization.
pub const GENERATED_BLANK_PREFIX: &str = "b";

/// JSON-LD 1.1 expansion, compaction, and RDF serialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLdTransformer;

fn processor_options(options: &TransformOptions) -> Result<json_ld::Options, DisclosureError> {
    let base = options
        .base
        .as_ref()
        .map(|base| {
            IriBuf::new(base.clone()).map_err(|_| {
                DisclosureError::Transform(format!("base {base:?} is not an absolute IRI"))
            })
        })
        .transpose()?;
    Ok(json_ld::Options {
        base,
        ..json_ld::Options::default()
    })
}

fn input_document(document: &Value) -> RemoteDocument {
    RemoteDocument::new(
        None,
        None,
        json_syntax::Value::from_serde_json(document.clone()),
    )
}

fn transform_error(stage: &str, error: impl std::fmt::Display) -> DisclosureError {
    DisclosureError::Transform(format!("{stage}: {error}"))
}

impl DocumentTransformer for JsonLdTransformer {
    async fn expand(
        &self,
        document: &Value,
        options: &TransformOptions,
    ) -> Result<Value, DisclosureError> {
        let loader = LoaderBridge::new(options);
        let expanded = input_document(document)
            .expand_using(&loader, processor_options(options)?)
            .await
            .map_err(|e| transform_error("expansion", e))?;
        let objects = expanded
            .into_objects()
            .into_iter()
            .map(|object| object.into_json_with(&()).into_serde_json())
            .collect();
        Ok(Value::Array(objects))
    }

    async fn compact(
        &self,
        expanded: &Value,
        context: &Value,
        options: &TransformOptions,
    ) -> Result<Value, DisclosureError> {
        let loader = LoaderBridge::new(options);
        let local = json_ld::syntax::Context::try_from_json(json_syntax::Value::from_serde_json(
            context.clone(),
        ))
        .map_err(|e| transform_error("context", e))?;
        let compacted = input_document(expanded)
            .compact_using(
                RemoteContextReference::Loaded(RemoteDocument::new(None, None, local)),
                &loader,
                processor_options(options)?,
            )
            .await
            .map_err(|e| transform_error("compaction", e))?;

        // Compaction leaves the context out of its output.
        let mut compacted = compacted.into_serde_json();
        if let Value::Object(map) = &mut compacted {
            if !context.is_null() {
                map.insert("@context".to_string(), context.clone());
            }
        }
        Ok(compacted)
    }

    async fn to_quads(
        &self,
        document: &Value,
        options: &TransformOptions,
    ) -> Result<Vec<String>, DisclosureError> {
        let loader = LoaderBridge::new(options);
        let mut rdf = input_document(document)
            .to_rdf_using(
                generator::Blank::new_with_prefix(GENERATED_BLANK_PREFIX.to_string()),
                &loader,
                processor_options(options)?,
            )
            .await
            .map_err(|e| transform_error("RDF serialization", e))?;
        let lines: Vec<String> = rdf
            .cloned_quads()
            .map(|quad| format!("{quad} .\n"))
            .collect();
        let quads = nquads::normalize(&lines)?;
        tracing::trace!(quads = quads.len(), "serialized document to quads");
        Ok(quads)
    }
}
