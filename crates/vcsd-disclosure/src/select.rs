//! # Pointer Selection
//!
//! Builds a *selection document*: the smallest compact fragment of a
//! credential that still contains every value named by a set of JSON
//! pointers, together with the identifier and type of every node on the
//! way, so that the fragment converts to quads that are a subset of the
//! full document's quads.
//!
//! ## Walk
//!
//! A pointer is walked in lock-step over the source document and the
//! selection. At each segment the source must have a value (otherwise the
//! pointer does not match and derivation fails); the selection gets an
//! empty sparse array if the source value is an array, or an initial
//! selection (id and type) if it is anything else. At the last segment the
//! selected value is copied in: scalars and arrays as-is, objects merged
//! over what earlier pointers already selected.
//!
//! Arrays are kept sparse while pointers are applied, so `/items/3` and
//! `/items/7` keep their relative order, and are densified at the end.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde_json::Value;
use vcsd_core::quad::is_blank_node_id;
use vcsd_core::{
    json_pointer_to_paths, DisclosureError, DocumentTransformer, LabelMap, PathSegment,
    ProofGenerationError, TransformOptions,
};

use crate::relabel::relabel_quads;
use crate::skolemize::to_deskolemized_quads;

/// Keys carrying a node identifier in compact form.
const ID_KEYS: &[&str] = &["id", "@id"];
/// Keys carrying node types in compact form.
const TYPE_KEYS: &[&str] = &["type", "@type"];

/// Options for building selection documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOptions {
    /// Copy `type` into every node on a selected path.
    pub include_types: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            include_types: true,
        }
    }
}

/// A selection under construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// An object with selected fields.
    Node(BTreeMap<String, Selection>),
    /// A sparse array: source index → selected element.
    Array(BTreeMap<usize, Selection>),
    /// A value copied verbatim from the source.
    Value(Value),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Node(BTreeMap::new())
    }
}

impl Selection {
    /// Densify into a JSON value. Unset array slots are dropped, and the
    /// remaining elements keep their relative order.
    pub fn into_value(self) -> Value {
        match self {
            Self::Node(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, child)| (key, child.into_value()))
                    .collect(),
            ),
            Self::Array(slots) => {
                Value::Array(slots.into_values().map(Selection::into_value).collect())
            }
            Self::Value(value) => value,
        }
    }

    fn insert_field(&mut self, key: &str, value: Selection) {
        if let Self::Node(fields) = self {
            fields.insert(key.to_string(), value);
        }
    }

    /// Turn a verbatim copy into structure so it can be descended into.
    fn open(&mut self) {
        if let Self::Value(value) = self {
            let opened = match value.take() {
                Value::Object(map) => Self::Node(
                    map.into_iter()
                        .map(|(k, v)| (k, Self::Value(v)))
                        .collect(),
                ),
                Value::Array(items) => Self::Array(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(i, v)| (i, Self::Value(v)))
                        .collect(),
                ),
                scalar => Self::Value(scalar),
            };
            *self = opened;
        }
    }

    /// The child at `segment`, created with `make` if absent.
    fn child(
        &mut self,
        segment: &PathSegment,
        pointer: &str,
        make: impl FnOnce() -> Result<Selection, DisclosureError>,
    ) -> Result<&mut Selection, DisclosureError> {
        self.open();
        let unresolved = || {
            DisclosureError::from(ProofGenerationError::UnresolvedPointer {
                pointer: pointer.to_string(),
            })
        };
        match (self, segment) {
            (Self::Node(fields), segment) => match fields.entry(segment.as_key().into_owned()) {
                Entry::Occupied(entry) => Ok(entry.into_mut()),
                Entry::Vacant(entry) => Ok(entry.insert(make()?)),
            },
            (Self::Array(slots), PathSegment::Index(index)) => match slots.entry(*index) {
                Entry::Occupied(entry) => Ok(entry.into_mut()),
                Entry::Vacant(entry) => Ok(entry.insert(make()?)),
            },
            _ => Err(unresolved()),
        }
    }
}

/// The initial selection for `source`: its identifier, unless blank, and
/// its type.
///
/// # Errors
///
/// [`DisclosureError::InvalidIdentifier`] for a non-string identifier.
pub fn create_initial_selection(
    source: &Value,
    options: &SelectOptions,
) -> Result<Selection, DisclosureError> {
    let mut selection = Selection::default();
    let Value::Object(object) = source else {
        return Ok(selection);
    };
    for key in ID_KEYS {
        match object.get(*key) {
            None => {}
            Some(Value::String(id)) if is_blank_node_id(id) => {}
            Some(id @ Value::String(_)) => selection.insert_field(key, Selection::Value(id.clone())),
            Some(other) => {
                return Err(DisclosureError::InvalidIdentifier(format!(
                    "{key} must be a string, got {other}"
                )))
            }
        }
    }
    if options.include_types {
        for key in TYPE_KEYS {
            if let Some(types) = object.get(*key) {
                selection.insert_field(key, Selection::Value(types.clone()));
            }
        }
    }
    Ok(selection)
}

fn step<'v>(value: &'v Value, segment: &PathSegment) -> Option<&'v Value> {
    match (value, segment) {
        (Value::Object(map), segment) => map.get(&*segment.as_key()),
        (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
        _ => None,
    }
}

/// Walk `paths` over `document`, recording what it reaches in `selection`.
///
/// `pointer` is the pointer `paths` was parsed from, used in errors. An
/// empty `paths` selects the whole document.
///
/// # Errors
///
/// [`ProofGenerationError::UnresolvedPointer`] if the pointer does not match
/// the document.
pub fn select_paths(
    pointer: &str,
    paths: &[PathSegment],
    document: &Value,
    selection: &mut Selection,
    options: &SelectOptions,
) -> Result<(), DisclosureError> {
    let mut value = document;
    let mut selected = selection;

    for segment in paths {
        value = step(value, segment).ok_or_else(|| ProofGenerationError::UnresolvedPointer {
            pointer: pointer.to_string(),
        })?;
        let source = value;
        selected = selected.child(segment, pointer, || match source {
            Value::Array(_) => Ok(Selection::Array(BTreeMap::new())),
            other => create_initial_selection(other, options),
        })?;
    }

    let leaf = match value {
        Value::Object(source) => {
            let mut fields = match std::mem::take(selected) {
                Selection::Node(fields) => fields,
                Selection::Value(Value::Object(map)) => map
                    .into_iter()
                    .map(|(k, v)| (k, Selection::Value(v)))
                    .collect(),
                _ => BTreeMap::new(),
            };
            for (key, field) in source {
                fields.insert(key.clone(), Selection::Value(field.clone()));
            }
            Selection::Node(fields)
        }
        other => Selection::Value(other.clone()),
    };
    *selected = leaf;
    Ok(())
}

/// Select the parts of `document` named by `pointers`, with default
/// options.
///
/// Returns `None` for an empty pointer list.
pub fn select_document<P: AsRef<str>>(
    pointers: &[P],
    document: &Value,
) -> Result<Option<Value>, DisclosureError> {
    select_document_with_options(pointers, document, &SelectOptions::default())
}

/// Select the parts of `document` named by `pointers`.
///
/// The selection carries a copy of `@context`. The empty pointer `""`
/// selects the whole document.
///
/// # Errors
///
/// [`DisclosureError::InvalidPointer`] for malformed pointers,
/// [`ProofGenerationError::UnresolvedPointer`] for pointers that do not
/// match, and [`DisclosureError::InvalidDocument`] if `document` is not an
/// object.
pub fn select_document_with_options<P: AsRef<str>>(
    pointers: &[P],
    document: &Value,
    options: &SelectOptions,
) -> Result<Option<Value>, DisclosureError> {
    if pointers.is_empty() {
        return Ok(None);
    }
    let Value::Object(object) = document else {
        return Err(DisclosureError::InvalidDocument(
            "selection requires an object document".to_string(),
        ));
    };

    let mut selection = create_initial_selection(document, options)?;
    if let Some(context) = object.get("@context") {
        selection.insert_field("@context", Selection::Value(context.clone()));
    }
    for pointer in pointers {
        let pointer = pointer.as_ref();
        let paths = json_pointer_to_paths(pointer)?;
        if paths.is_empty() {
            return Ok(Some(document.clone()));
        }
        select_paths(pointer, &paths, document, &mut selection, options)?;
    }
    tracing::trace!(pointers = pointers.len(), "built selection document");
    Ok(Some(selection.into_value()))
}

/// A selection converted to canonical quads.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSelection {
    /// The selection document, `None` for an empty pointer list.
    pub selection_document: Option<Value>,
    /// The selection's quads before relabeling.
    pub deskolemized_quads: Vec<String>,
    /// The selection's quads relabeled with the established label map.
    pub quads: Vec<String>,
}

/// Select from a skolemized compact document and express the result in
/// the canonical labels of the full document.
///
/// # Errors
///
/// Selection and transformer errors pass through;
/// [`ProofGenerationError::MissingLabel`] if the selection mentions a blank
/// node the label map does not cover.
pub async fn select_canonical_quads<T, P>(
    transformer: &T,
    pointers: &[P],
    skolemized_compact_document: &Value,
    label_map: &LabelMap,
    urn_scheme: &str,
    options: &TransformOptions,
) -> Result<CanonicalSelection, DisclosureError>
where
    T: DocumentTransformer,
    P: AsRef<str>,
{
    let selection_document = select_document(pointers, skolemized_compact_document)?;
    let deskolemized_quads = match &selection_document {
        Some(document) => to_deskolemized_quads(transformer, document, urn_scheme, options).await?,
        None => Vec::new(),
    };
    let quads = relabel_quads(&deskolemized_quads, label_map)?;
    Ok(CanonicalSelection {
        selection_document,
        deskolemized_quads,
        quads,
    })
}

/// Convenience: a pointer's path segments as a JSON value, for display.
pub fn paths_to_json(paths: &[PathSegment]) -> Result<Value, DisclosureError> {
    Ok(serde_json::to_value(paths)?)
}
