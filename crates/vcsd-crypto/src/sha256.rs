//! # SHA-256 Hasher
//!
//! Unkeyed [`Hasher`] used to digest mandatory quads.

use sha2::{Digest, Sha256};
use vcsd_core::{DisclosureError, Hasher};

/// SHA-256 over raw bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    /// Digest `data` synchronously.
    pub fn digest(data: &[u8]) -> [u8; 32] {
        let hash = Sha256::digest(data);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        bytes
    }
}

impl Hasher for Sha256Hasher {
    async fn hash(&self, data: &[u8]) -> Result<Vec<u8>, DisclosureError> {
        Ok(Self::digest(data).to_vec())
    }
}

/// Render bytes as a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
