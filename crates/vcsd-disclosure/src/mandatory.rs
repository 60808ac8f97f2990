//! # Mandatory Hashing
//!
//! Digest of the quads the issuer requires every disclosure to reveal.
//! The quads are concatenated in the order given, with no separator beyond
//! each line's own `\n`, and hashed by the caller's [`Hasher`]. Reordering
//! the quads changes the digest.

use vcsd_core::quad::join_quads;
use vcsd_core::{DisclosureError, Hasher};

/// Hash `mandatory_quads` with `hasher`.
pub async fn hash_mandatory_quads<H: Hasher>(
    mandatory_quads: &[String],
    hasher: &H,
) -> Result<Vec<u8>, DisclosureError> {
    let bytes = join_quads(mandatory_quads).into_bytes();
    let digest = hasher.hash(&bytes).await?;
    tracing::debug!(
        quads = mandatory_quads.len(),
        bytes = bytes.len(),
        "hashed mandatory quads"
    );
    Ok(digest)
}
