//! Mock embedding provider using feature-hashed bag-of-tokens vectors.

use crate::embeddings::provider::EmbeddingProvider;
use helpdesk_core::AppResult;
use std::collections::HashMap;

/// Mock provider for testing and offline development.
///
/// Embeds text by hashing each token and each of its character bigrams
/// into a fixed number of dimensions, weighted by term frequency.
/// Texts sharing vocabulary land near each other, which is all the
/// retrieval tests need; the same input always yields the same vector.
#[derive(Debug)]
pub struct MockProvider {
    dimensions: usize,
}

impl MockProvider {
    /// Create a new mock provider with the given output dimension.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Build a unit-length feature-hashed embedding.
    ///
    /// Empty or feature-less text yields the zero vector.
    fn feature_embedding(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];

        for (token, count) in token_counts(text) {
            // Log-scale term frequency so repetition doesn't dominate
            let weight = 1.0 + (count as f32).ln();

            // Whole token carries more signal than its fragments
            embedding[self.slot(token.as_bytes())] += 2.0 * weight;

            let chars: Vec<char> = token.chars().collect();
            for pair in chars.windows(2) {
                let mut bytes = [0u8; 8];
                let first = pair[0].encode_utf8(&mut bytes[..4]).len();
                let second = pair[1].encode_utf8(&mut bytes[first..]).len();
                embedding[self.slot(&bytes[..first + second])] += weight;
            }
        }

        let norm: f32 = embedding.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }

    /// Map a feature to a dimension via FNV-1a.
    fn slot(&self, feature: &[u8]) -> usize {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

        let mut hash = FNV_OFFSET;
        for &byte in feature {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }

        (hash as usize) % self.dimensions
    }
}

/// Lowercased alphanumeric tokens of length >= 2 with their counts.
fn token_counts(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();

    for token in text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
    {
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }

    counts
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "feature-hash-v1"
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        Ok(self.feature_embedding(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_names() {
        let provider = MockProvider::new(384);
        assert_eq!(provider.provider_name(), "mock");
        assert_eq!(provider.model_name(), "feature-hash-v1");
    }

    #[tokio::test]
    async fn test_mock_provider_embed_single() {
        let provider = MockProvider::new(384);
        let embedding = provider.embed("hello world").await.unwrap();

        assert_eq!(embedding.len(), 384);

        // Verify normalization (unit vector)
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_mock_provider_deterministic() {
        let provider = MockProvider::new(384);
        let text = "deterministic test";

        let embedding1 = provider.embed(text).await.unwrap();
        let embedding2 = provider.embed(text).await.unwrap();

        // Same text should produce identical embeddings
        assert_eq!(embedding1, embedding2);
    }

    #[tokio::test]
    async fn test_mock_provider_different_texts() {
        let provider = MockProvider::new(384);

        let embedding1 = provider.embed("hello world").await.unwrap();
        let embedding2 = provider.embed("goodbye world").await.unwrap();

        assert_ne!(embedding1, embedding2);
    }

    #[tokio::test]
    async fn test_shared_vocabulary_lands_closer() {
        let provider = MockProvider::new(384);

        let query = provider.embed("VPN authentication").await.unwrap();
        let related = provider.embed("VPN fails after update").await.unwrap();
        let unrelated = provider.embed("printer offline").await.unwrap();

        let d_related: f32 = query
            .iter()
            .zip(&related)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        let d_unrelated: f32 = query
            .iter()
            .zip(&unrelated)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();

        assert!(d_related < d_unrelated);
    }

    #[tokio::test]
    async fn test_mock_provider_empty_text() {
        let provider = MockProvider::new(384);
        let embedding = provider.embed("").await.unwrap();

        assert_eq!(embedding.len(), 384);
        assert!(embedding.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn test_mock_provider_utf8_safety() {
        let provider = MockProvider::new(384);

        let text = "impressora está offline 🖨️ desde a atualização!";
        let embedding = provider.embed(text).await.unwrap();

        assert_eq!(embedding.len(), 384);

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_token_counts() {
        let counts = token_counts("VPN fails, VPN fails, again!");
        assert_eq!(counts["vpn"], 2);
        assert_eq!(counts["fails"], 2);
        assert_eq!(counts["again"], 1);
        // Single-character fragments are dropped
        assert!(!counts.contains_key("a"));
    }
}
