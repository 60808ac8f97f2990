//! # Error Types — Disclosure Error Taxonomy
//!
//! Defines the single error type returned by every operation of the
//! selective-disclosure engine. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Input errors (malformed pointer, missing `@context`, non-string `@id`)
//!   are reported immediately and never retried.
//! - Processing errors raised while deriving a disclosure are grouped under
//!   [`DisclosureError::ProofGeneration`] so callers can tell disclosure-time
//!   failures apart from verification-time failures.
//! - Canonicalizer work-bound violations have their own variant: the engine
//!   fails closed instead of hanging on adversarial graphs.
//!
//! Nothing in the engine recovers from any of these. Canonicalization and
//! selection are pure functions of their inputs.

use thiserror::Error;

/// Coarse classification of a [`DisclosureError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed caller input.
    Input,
    /// Failure while deriving a disclosure from well-formed input.
    ProofGeneration,
    /// The canonicalizer exceeded its configured work bound.
    CanonicalizationLimit,
    /// The caller cancelled the operation.
    Aborted,
    /// An injected collaborator (transformer, loader, hasher) failed.
    Collaborator,
    /// JSON (de)serialization failed.
    Serialization,
}

impl ErrorKind {
    /// Returns the kind identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::ProofGeneration => "proof-generation",
            Self::CanonicalizationLimit => "canonicalization-limit",
            Self::Aborted => "aborted",
            Self::Collaborator => "collaborator",
            Self::Serialization => "serialization",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error type for the selective-disclosure engine.
#[derive(Error, Debug)]
pub enum DisclosureError {
    /// A JSON pointer could not be parsed.
    #[error("invalid JSON pointer {pointer:?}: {reason}")]
    InvalidPointer {
        /// The offending pointer string.
        pointer: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The document's top-level `@context` is missing or unusable.
    #[error("invalid @context: {0}")]
    InvalidContext(String),

    /// A node identifier is not a string.
    #[error("invalid node identifier: {0}")]
    InvalidIdentifier(String),

    /// The document has a shape the operation cannot process.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A quad line is malformed.
    #[error("invalid quad line {line:?}: {reason}")]
    InvalidQuad {
        /// The offending line.
        line: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Deriving the disclosure failed.
    #[error("proof generation error: {0}")]
    ProofGeneration(#[from] ProofGenerationError),

    /// The canonicalizer hit its work bound.
    #[error("canonicalization work bound exceeded: {0}")]
    CanonicalizationLimit(String),

    /// The operation was cancelled through its abort signal.
    #[error("operation aborted")]
    Aborted,

    /// The document transformer reported a failure.
    #[error("document transformer error: {0}")]
    Transform(String),

    /// A referenced document could not be loaded.
    #[error("failed to load document {url}: {reason}")]
    DocumentLoad {
        /// The URL that was requested.
        url: String,
        /// The loader's failure description.
        reason: String,
    },

    /// A hasher or HMAC function failed.
    #[error("hash error: {0}")]
    Hash(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DisclosureError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPointer { .. }
            | Self::InvalidContext(_)
            | Self::InvalidIdentifier(_)
            | Self::InvalidDocument(_)
            | Self::InvalidQuad { .. } => ErrorKind::Input,
            Self::ProofGeneration(_) => ErrorKind::ProofGeneration,
            Self::CanonicalizationLimit(_) => ErrorKind::CanonicalizationLimit,
            Self::Aborted => ErrorKind::Aborted,
            Self::Transform(_) | Self::DocumentLoad { .. } | Self::Hash(_) => {
                ErrorKind::Collaborator
            }
            Self::Json(_) => ErrorKind::Serialization,
        }
    }

    /// Build an [`DisclosureError::InvalidPointer`].
    pub fn invalid_pointer(pointer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPointer {
            pointer: pointer.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`DisclosureError::InvalidQuad`].
    pub fn invalid_quad(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidQuad {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

/// Failures raised while deriving a disclosure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofGenerationError {
    /// A JSON pointer does not resolve against the document.
    #[error("JSON pointer {pointer:?} does not match document")]
    UnresolvedPointer {
        /// The pointer that failed to resolve.
        pointer: String,
    },

    /// A label map has no entry for a blank node present in the quads.
    #[error("label map has no entry for blank node {label:?}")]
    MissingLabel {
        /// The blank node identifier without its `_:` sigil.
        label: String,
    },

    /// A label-map factory produced the same label for two inputs.
    #[error("label map assigns {label:?} to more than one blank node")]
    DuplicateLabel {
        /// The label that was assigned twice.
        label: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_variants_classify_as_input() {
        let errors = vec![
            DisclosureError::invalid_pointer("/a~2", "bad escape"),
            DisclosureError::InvalidContext("missing".to_string()),
            DisclosureError::InvalidIdentifier("42".to_string()),
            DisclosureError::InvalidDocument("not an object".to_string()),
            DisclosureError::invalid_quad("junk", "no terminator"),
        ];
        for e in errors {
            assert_eq!(e.kind(), ErrorKind::Input, "{e}");
        }
    }

    #[test]
    fn proof_generation_is_distinct_kind() {
        let err = DisclosureError::from(ProofGenerationError::UnresolvedPointer {
            pointer: "/credentialSubject/missing".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::ProofGeneration);
        let msg = format!("{err}");
        assert!(msg.contains("/credentialSubject/missing"));
        assert!(msg.starts_with("proof generation error"));
    }

    #[test]
    fn limit_and_abort_are_distinct_from_input() {
        let limit = DisclosureError::CanonicalizationLimit("16 rounds".to_string());
        assert_eq!(limit.kind(), ErrorKind::CanonicalizationLimit);
        assert_eq!(DisclosureError::Aborted.kind(), ErrorKind::Aborted);
    }

    #[test]
    fn collaborator_errors_display_context() {
        let err = DisclosureError::DocumentLoad {
            url: "https://example.org/ctx".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Collaborator);
        let msg = format!("{err}");
        assert!(msg.contains("https://example.org/ctx"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DisclosureError::from(json_err);
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn missing_label_display() {
        let err = ProofGenerationError::MissingLabel {
            label: "b7".to_string(),
        };
        assert!(format!("{err}").contains("b7"));
    }

    #[test]
    fn kind_display() {
        assert_eq!(ErrorKind::ProofGeneration.to_string(), "proof-generation");
        assert_eq!(ErrorKind::Input.to_string(), "input");
    }
}
