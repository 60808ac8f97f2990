//! # vcsd-reference — Collaborator Adapters
//!
//! Implementations of the collaborator traits from `vcsd-core` over
//! registry crates, used by the engine's tests, the integration suite, and
//! the CLI:
//!
//! - [`JsonLdTransformer`]: JSON-LD 1.1 expansion, compaction, and RDF
//!   serialization through `json-ld`.
//! - [`RdfcCanonicalizer`]: RDFC-1.0 through `rdf-canon`, with the
//!   `max_iterations` option enforced as an N-degree hashing budget.
//! - [`StaticDocumentLoader`]: serves `@context` documents from memory.
//!
//! Quad lines are spelled by one codec ([`nquads`]) on both sides, so the
//! transformer's output feeds the canonicalizer without re-escaping.
//!
//! ## Crate Policy
//!
//! - Never performs network I/O. Remote contexts go through the caller's
//!   loader or fail.

pub mod canonicalize;
pub mod loader;
pub mod nquads;
pub mod transform;

pub use canonicalize::RdfcCanonicalizer;
pub use loader::StaticDocumentLoader;
pub use transform::JsonLdTransformer;
