//! # vcsd-crypto — Hashers and Label-Map Factories
//!
//! Provides the cryptographic strategies the disclosure engine is
//! parameterised with:
//!
//! - **SHA-256** ([`Sha256Hasher`]) for hashing mandatory quads.
//! - **HMAC-SHA-256** ([`HmacSha256`]) keyed hashing, with zeroized keys.
//! - **Label-map factories** ([`HmacLabelMapFactory`],
//!   [`ShuffledLabelMapFactory`], [`RandomShuffledLabelMapFactory`]) that
//!   decide how blank nodes are named in a disclosure.
//!
//! ## Crate Policy
//!
//! - Depends only on `vcsd-core` internally.
//! - Tests use real SHA-256 and real HMAC, checked against published
//!   vectors.

pub mod hmac;
pub mod label_factory;
pub mod sha256;

pub use crate::hmac::{HmacSha256, HMAC_KEY_LENGTH};
pub use label_factory::{
    multibase_base64url, HmacLabelMapFactory, RandomShuffledLabelMapFactory,
    ShuffledLabelMapFactory, MULTIBASE_BASE64URL_PREFIX,
};
pub use sha256::{to_hex, Sha256Hasher};
