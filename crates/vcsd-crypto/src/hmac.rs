//! # HMAC-SHA-256 Keyed Hasher
//!
//! The HMAC key is what makes HMAC-derived blank-node labels unlinkable: two
//! holders of the same credential with different keys see unrelated labels,
//! while one key always reproduces the same labels.
//!
//! ## Security Invariants
//!
//! - Key material is zeroized on drop.
//! - `Debug` never prints the key.

use ::hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use vcsd_core::{DisclosureError, Hasher};

type HmacSha256Mac = Hmac<Sha256>;

/// Length in bytes of generated keys.
pub const HMAC_KEY_LENGTH: usize = 32;

/// HMAC-SHA-256 with a caller-owned key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HmacSha256 {
    key: Vec<u8>,
}

impl std::fmt::Debug for HmacSha256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HmacSha256(<private>)")
    }
}

impl HmacSha256 {
    /// Create a keyed hasher from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DisclosureError::Hash`] for an empty key.
    pub fn new(key: &[u8]) -> Result<Self, DisclosureError> {
        if key.is_empty() {
            return Err(DisclosureError::Hash("HMAC key must not be empty".to_string()));
        }
        Ok(Self { key: key.to_vec() })
    }

    /// Create a keyed hasher from a hex-encoded key.
    pub fn from_hex(hex: &str) -> Result<Self, DisclosureError> {
        let mut bytes = decode_hex(hex).map_err(DisclosureError::Hash)?;
        let hasher = Self::new(&bytes);
        bytes.zeroize();
        hasher
    }

    /// Generate a fresh random key using the OS CSPRNG.
    pub fn generate() -> Self {
        let mut key = vec![0u8; HMAC_KEY_LENGTH];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    /// Compute the MAC of `data`.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, DisclosureError> {
        let mut mac = HmacSha256Mac::new_from_slice(&self.key)
            .map_err(|e| DisclosureError::Hash(format!("HMAC key rejected: {e}")))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl Hasher for HmacSha256 {
    async fn hash(&self, data: &[u8]) -> Result<Vec<u8>, DisclosureError> {
        self.sign(data)
    }
}

/// Decode a hex string into bytes.
fn decode_hex(s: &str) -> Result<Vec<u8>, String> {
    let s = s.trim();
    if s.len() % 2 != 0 {
        return Err(format!("hex string has odd length: {}", s.len()));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            s.get(i..i + 2)
                .ok_or_else(|| format!("invalid hex at position {i}"))
                .and_then(|pair| {
                    u8::from_str_radix(pair, 16)
                        .map_err(|e| format!("invalid hex at position {i}: {e}"))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sha256::to_hex;

    #[test]
    fn rfc4231_test_case_2() {
        // Key = "Jefe", Data = "what do ya want for nothing?"
        let hmac = HmacSha256::new(b"Jefe").unwrap();
        let mac = hmac.sign(b"what do ya want for nothing?").unwrap();
        assert_eq!(
            to_hex(&mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn from_hex_matches_raw_key() {
        let a = HmacSha256::from_hex("4a656665").unwrap();
        let b = HmacSha256::new(b"Jefe").unwrap();
        assert_eq!(a.sign(b"x").unwrap(), b.sign(b"x").unwrap());
    }

    #[test]
    fn invalid_hex_rejected() {
        assert!(HmacSha256::from_hex("abc").is_err());
        assert!(HmacSha256::from_hex("zz").is_err());
        assert!(HmacSha256::from_hex("").is_err());
    }

    #[test]
    fn generated_keys_differ() {
        let a = HmacSha256::generate();
        let b = HmacSha256::generate();
        assert_ne!(a.sign(b"c14n0").unwrap(), b.sign(b"c14n0").unwrap());
    }

    #[test]
    fn debug_redacts_key() {
        let hmac = HmacSha256::new(b"secret-key").unwrap();
        let s = format!("{hmac:?}");
        assert!(!s.contains("secret"));
        assert!(s.contains("<private>"));
    }

    #[tokio::test]
    async fn hasher_trait_delegates_to_sign() {
        let hmac = HmacSha256::new(b"Jefe").unwrap();
        let via_trait = hmac.hash(b"data").await.unwrap();
        assert_eq!(via_trait, hmac.sign(b"data").unwrap());
    }
}
