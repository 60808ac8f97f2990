//! # vcsd-core — Foundational Types for Selective Disclosure
//!
//! This crate is the leaf of the `vcsd` workspace. It defines the shared
//! vocabulary every other crate speaks:
//!
//! - **Quad lines** and the blank-node token grammar ([`quad`]). Every
//!   textual rewrite of N-Quads flows through this module.
//! - **JSON pointers** ([`pointer`]) for naming the claims to disclose.
//! - **Label maps** ([`label_map`]) and their totality checks.
//! - **Collaborator traits** ([`traits`]): the document transformer, the
//!   canonicalizer, the document loader, hashers, and label-map factories.
//! - **Options** ([`options`]) passed per call, including the abort signal.
//! - **Errors** ([`error`]) with a kind classifier separating input errors,
//!   proof-generation errors, and canonicalizer bound violations.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vcsd-*` crates.
//! - No `unsafe` code.
//! - No process-wide mutable state.

pub mod equality;
pub mod error;
pub mod label_map;
pub mod options;
pub mod pointer;
pub mod quad;
pub mod traits;

// Re-export primary types for ergonomic imports.
pub use equality::structurally_equal;
pub use error::{DisclosureError, ErrorKind, ProofGenerationError};
pub use label_map::LabelMap;
pub use options::{
    AbortSignal, CanonicalizationAlgorithm, CanonicalizeOptions, DisclosureOptions,
    TransformOptions, DEFAULT_MAX_ITERATIONS, DEFAULT_URN_SCHEME,
};
pub use pointer::{json_pointer_to_paths, PathSegment};
pub use traits::{
    CanonicalizedDataset, Canonicalizer, DocumentLoader, DocumentTransformer, Hasher,
    LabelMapFactory,
};
