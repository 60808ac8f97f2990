//! # vcsd-disclosure — Selective-Disclosure Engine
//!
//! Prepares data-integrity credentials for selective disclosure: an issuer
//! signs a credential once, and a holder later reveals only chosen claims,
//! each revealed statement still verifiable against the issuer's signature.
//!
//! ## Pipeline
//!
//! 1. **Skolemize** ([`skolemize`]): name every blank node with a URN so
//!    that selections of the same credential agree on node identity.
//! 2. **Deskolemize to quads**: convert to N-Quads and turn the URNs back
//!    into blank nodes.
//! 3. **Label replacement** ([`label_replacement`]): canonicalize and
//!    rename blank nodes through a label-map factory (HMAC-derived,
//!    shuffled, or static).
//! 4. **Select** ([`select`]): build the fragment of the credential named
//!    by JSON pointers and express it in the same canonical labels.
//! 5. **Group** ([`group`]): partition the canonical quads per named pointer
//!    group into matching and non-matching index sets.
//! 6. **Hash** ([`mandatory`]): digest the mandatory quads.
//!
//! [`disclosure::plan_disclosure`] runs the whole pipeline for the usual
//! mandatory/selective split.
//!
//! ## Collaborators
//!
//! The document transformer, canonicalizer, hasher, and label-map factory
//! are injected through the traits in `vcsd-core`. The engine never
//! performs network I/O itself and holds no state between calls.
//!
//! ## Crate Policy
//!
//! - Depends only on `vcsd-core` internally.
//! - Blank-node token rewriting goes through `vcsd_core::quad`; no other
//!   module parses quad lines.
//! - No `unsafe` code.

pub mod disclosure;
pub mod group;
pub mod label_replacement;
pub mod mandatory;
pub mod relabel;
pub mod select;
pub mod skolemize;

pub use disclosure::{
    plan_disclosure, DisclosurePlan, COMBINED_GROUP, MANDATORY_GROUP, SELECTIVE_GROUP,
};
pub use group::{canonicalize_and_group, GroupDefinitions, GroupResult, GroupedCanonicalization};
pub use label_replacement::{
    label_replacement_canonicalize_document, label_replacement_canonicalize_quads,
    LabelReplacedQuads, StaticLabelMapFactory,
};
pub use mandatory::hash_mandatory_quads;
pub use relabel::relabel_quads;
pub use select::{
    create_initial_selection, paths_to_json, select_canonical_quads, select_document,
    select_document_with_options, select_paths, CanonicalSelection, SelectOptions, Selection,
};
pub use skolemize::{
    deskolemize_quads, skolemize_compact_document, skolemize_expanded_document, skolemize_quads,
    to_deskolemized_quads, SkolemContext, SkolemizedDocument,
};
