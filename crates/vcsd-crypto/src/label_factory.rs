//! # Label-Map Factories
//!
//! Turn the canonicalizer's canonical-identifier map into the labels a
//! holder actually discloses.
//!
//! - [`HmacLabelMapFactory`]: each label is `u` + base64url-no-pad of the
//!   HMAC of the canonical label. Deterministic for one key, unlinkable
//!   without it.
//! - [`ShuffledLabelMapFactory`]: labels `b0`, `b1`, … assigned in the
//!   order of the HMAC digests of the canonical labels, so the label order
//!   reveals nothing about the canonical order.
//! - [`RandomShuffledLabelMapFactory`]: labels `b0`, `b1`, … assigned in a
//!   fresh random order on every call.
//!
//! The static (caller-supplied map) factory lives in `vcsd-disclosure`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;

use vcsd_core::{DisclosureError, Hasher, LabelMap, LabelMapFactory};

/// Multibase prefix character for base64url-no-pad.
pub const MULTIBASE_BASE64URL_PREFIX: char = 'u';

/// Default label prefix used by the shuffled factories.
pub const DEFAULT_SHUFFLED_PREFIX: &str = "b";

/// Encode bytes as a multibase base64url-no-pad string (`u…`).
pub fn multibase_base64url(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(1 + bytes.len() * 4 / 3 + 2);
    out.push(MULTIBASE_BASE64URL_PREFIX);
    out.push_str(&URL_SAFE_NO_PAD.encode(bytes));
    out
}

/// HMAC-derived labels.
#[derive(Debug, Clone)]
pub struct HmacLabelMapFactory<H> {
    hasher: H,
}

impl<H: Hasher> HmacLabelMapFactory<H> {
    /// Create a factory that labels with `hasher` (normally an
    /// [`HmacSha256`](crate::HmacSha256)).
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }
}

impl<H: Hasher> LabelMapFactory for HmacLabelMapFactory<H> {
    async fn create_label_map(
        &self,
        canonical_id_map: &LabelMap,
    ) -> Result<LabelMap, DisclosureError> {
        let mut labels = LabelMap::new();
        for (input, canonical) in canonical_id_map {
            let digest = self.hasher.hash(canonical.as_bytes()).await?;
            labels.insert(input.clone(), multibase_base64url(&digest));
        }
        tracing::debug!(labels = labels.len(), "built HMAC label map");
        Ok(labels)
    }
}

/// Sequential labels ranked by HMAC digest.
#[derive(Debug, Clone)]
pub struct ShuffledLabelMapFactory<H> {
    hasher: H,
    prefix: String,
}

impl<H: Hasher> ShuffledLabelMapFactory<H> {
    /// Create a factory issuing `b<rank>` labels.
    pub fn new(hasher: H) -> Self {
        Self::with_prefix(hasher, DEFAULT_SHUFFLED_PREFIX)
    }

    /// Create a factory issuing `<prefix><rank>` labels.
    pub fn with_prefix(hasher: H, prefix: impl Into<String>) -> Self {
        Self {
            hasher,
            prefix: prefix.into(),
        }
    }
}

impl<H: Hasher> LabelMapFactory for ShuffledLabelMapFactory<H> {
    async fn create_label_map(
        &self,
        canonical_id_map: &LabelMap,
    ) -> Result<LabelMap, DisclosureError> {
        let mut digested = Vec::with_capacity(canonical_id_map.len());
        for (input, canonical) in canonical_id_map {
            let digest = self.hasher.hash(canonical.as_bytes()).await?;
            digested.push((URL_SAFE_NO_PAD.encode(digest), input));
        }
        digested.sort();

        let labels: LabelMap = digested
            .into_iter()
            .enumerate()
            .map(|(rank, (_, input))| (input.clone(), format!("{}{rank}", self.prefix)))
            .collect();
        tracing::debug!(labels = labels.len(), "built shuffled label map");
        Ok(labels)
    }
}

/// Sequential labels assigned in a random order.
#[derive(Debug, Clone)]
pub struct RandomShuffledLabelMapFactory {
    prefix: String,
}

impl Default for RandomShuffledLabelMapFactory {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_SHUFFLED_PREFIX.to_string(),
        }
    }
}

impl RandomShuffledLabelMapFactory {
    /// Create a factory issuing `<prefix><n>` labels.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl LabelMapFactory for RandomShuffledLabelMapFactory {
    async fn create_label_map(
        &self,
        canonical_id_map: &LabelMap,
    ) -> Result<LabelMap, DisclosureError> {
        let mut inputs: Vec<&String> = canonical_id_map.keys().collect();
        inputs.shuffle(&mut OsRng);
        Ok(inputs
            .into_iter()
            .enumerate()
            .map(|(n, input)| (input.clone(), format!("{}{n}", self.prefix)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmac::HmacSha256;
    use std::collections::BTreeSet;

    fn canonical_map(n: usize) -> LabelMap {
        (0..n)
            .map(|i| (format!("b{i}"), format!("c14n{}", n - 1 - i)))
            .collect()
    }

    #[test]
    fn multibase_prefix_and_alphabet() {
        let s = multibase_base64url(&[0xfb, 0xff, 0x00]);
        assert!(s.starts_with('u'));
        assert_eq!(s, "u-_8A");
        assert!(!s.contains('='));
    }

    #[tokio::test]
    async fn hmac_labels_are_digest_of_canonical_label() {
        let key = HmacSha256::new(b"test-key").unwrap();
        let factory = HmacLabelMapFactory::new(key.clone());
        let input = canonical_map(2);
        let labels = factory.create_label_map(&input).await.unwrap();

        assert_eq!(labels.len(), 2);
        let expected = multibase_base64url(&key.sign(b"c14n1").unwrap());
        assert_eq!(labels["b0"], expected);
        // SHA-256 output is 32 bytes: 43 base64url chars plus the marker.
        assert_eq!(labels["b0"].len(), 44);
    }

    #[tokio::test]
    async fn hmac_labels_are_stable_per_key() {
        let factory = HmacLabelMapFactory::new(HmacSha256::new(b"k").unwrap());
        let input = canonical_map(3);
        let a = factory.create_label_map(&input).await.unwrap();
        let b = factory.create_label_map(&input).await.unwrap();
        assert_eq!(a, b);

        let other = HmacLabelMapFactory::new(HmacSha256::new(b"k2").unwrap());
        let c = other.create_label_map(&input).await.unwrap();
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn shuffled_labels_are_a_permutation() {
        let factory = ShuffledLabelMapFactory::new(HmacSha256::new(b"k").unwrap());
        let input = canonical_map(5);
        let labels = factory.create_label_map(&input).await.unwrap();

        let keys: BTreeSet<_> = labels.keys().cloned().collect();
        let expected_keys: BTreeSet<_> = input.keys().cloned().collect();
        assert_eq!(keys, expected_keys);

        let values: BTreeSet<_> = labels.values().cloned().collect();
        let expected_values: BTreeSet<_> = (0..5).map(|i| format!("b{i}")).collect();
        assert_eq!(values, expected_values);

        let again = factory.create_label_map(&input).await.unwrap();
        assert_eq!(labels, again);
    }

    #[tokio::test]
    async fn shuffled_custom_prefix() {
        let factory = ShuffledLabelMapFactory::with_prefix(HmacSha256::new(b"k").unwrap(), "x");
        let labels = factory.create_label_map(&canonical_map(2)).await.unwrap();
        assert!(labels.values().all(|v| v.starts_with('x')));
    }

    #[tokio::test]
    async fn random_shuffled_labels_are_a_permutation() {
        let factory = RandomShuffledLabelMapFactory::default();
        let input = canonical_map(4);
        let labels = factory.create_label_map(&input).await.unwrap();
        let values: BTreeSet<_> = labels.values().cloned().collect();
        let expected: BTreeSet<_> = (0..4).map(|i| format!("b{i}")).collect();
        assert_eq!(values, expected);
        assert_eq!(labels.len(), 4);
    }
}
