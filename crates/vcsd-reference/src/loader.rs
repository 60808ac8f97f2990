//! # Document Loaders
//!
//! [`StaticDocumentLoader`] serves documents from an in-memory table and
//! never touches the network. [`LoaderBridge`] hands the caller's
//! [`DocumentLoader`] to the `json-ld` processor.

use std::collections::HashMap;

use futures::future::BoxFuture;
use json_ld::{Iri, IriBuf, LoadError, RemoteDocument};
use serde_json::Value;
use vcsd_core::{DisclosureError, DocumentLoader, TransformOptions};

/// URL → document table.
#[derive(Debug, Clone, Default)]
pub struct StaticDocumentLoader {
    documents: HashMap<String, Value>,
}

impl StaticDocumentLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `document` under `url`.
    pub fn with_document(mut self, url: impl Into<String>, document: Value) -> Self {
        self.insert(url, document);
        self
    }

    /// Register `document` under `url`, replacing any previous entry.
    pub fn insert(&mut self, url: impl Into<String>, document: Value) {
        self.documents.insert(url.into(), document);
    }

    fn lookup(&self, url: &str) -> Result<Value, DisclosureError> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| DisclosureError::DocumentLoad {
                url: url.to_string(),
                reason: "document not registered".to_string(),
            })
    }
}

impl DocumentLoader for StaticDocumentLoader {
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, DisclosureError>> {
        Box::pin(futures::future::ready(self.lookup(url)))
    }
}

/// Raised when a remote context is referenced but no loader was configured.
#[derive(Debug, thiserror::Error)]
#[error("no document loader configured")]
pub struct NoDocumentLoader;

/// Adapts a [`DocumentLoader`] to [`json_ld::Loader`].
pub struct LoaderBridge<'a> {
    inner: Option<&'a dyn DocumentLoader>,
}

impl<'a> LoaderBridge<'a> {
    /// Bridge the loader carried by `options`, if any.
    pub fn new(options: &'a TransformOptions) -> Self {
        Self {
            inner: options.document_loader.as_deref(),
        }
    }
}

impl json_ld::Loader for LoaderBridge<'_> {
    async fn load(&self, url: &Iri) -> Result<RemoteDocument<IriBuf>, LoadError> {
        let Some(inner) = self.inner else {
            return Err(LoadError::new(url.to_owned(), NoDocumentLoader));
        };
        tracing::debug!(url = url.as_str(), "loading remote document");
        let document = inner
            .load(url.as_str())
            .await
            .map_err(|e| LoadError::new(url.to_owned(), e))?;
        Ok(RemoteDocument::new(
            Some(url.to_owned()),
            None,
            json_syntax::Value::from_serde_json(document),
        ))
    }
}
