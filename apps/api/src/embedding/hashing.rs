//! The default, fully local embedding backend.
//!
//! Feature hashing over normalized tokens: each token hashes into one of
//! `dimensions` buckets and bumps that bucket's count. Documents sharing
//! vocabulary land in shared buckets, so cosine over these vectors is a
//! term-overlap similarity. Not a semantic model, but it runs without a
//! network and always produces the same vector for the same text.

use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::embedding::{EmbedError, Embedder};
use crate::text::normalizer::{normalize, NormalizerConfig};

pub const DEFAULT_DIMENSIONS: usize = 256;

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
    normalizer: NormalizerConfig,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize, normalizer: NormalizerConfig) -> Self {
        HashingEmbedder {
            dimensions: dimensions.max(1),
            normalizer,
        }
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        HashingEmbedder::new(DEFAULT_DIMENSIONS, NormalizerConfig::default())
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in normalize(text, &self.normalizer) {
            // DefaultHasher::new() uses fixed keys, so bucket assignment is
            // stable across runs and hosts.
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            token.hash(&mut hasher);
            let bucket = (hasher.finish() % self.dimensions as u64) as usize;
            vector[bucket] += 1.0;
        }

        Ok(vector)
    }

    fn name(&self) -> &'static str {
        "hashing"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::semantic_similarity;

    #[tokio::test]
    async fn test_embedding_is_deterministic() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed("Python and SQL pipelines").await.expect("embed");
        let b = embedder.embed("Python and SQL pipelines").await.expect("embed");
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_identical_texts_score_one() {
        let embedder = HashingEmbedder::default();
        let text = "Senior Python engineer building data pipelines";
        let sim = semantic_similarity(&embedder, text, text)
            .await
            .expect("similarity");
        assert!((sim - 1.0).abs() < 1e-6, "got {sim}");
    }

    #[tokio::test]
    async fn test_overlapping_texts_score_between_disjoint_and_identical() {
        let embedder = HashingEmbedder::default();
        let resume = "python sql airflow dbt warehouse";
        let near = "python sql spark kafka streaming";
        let far = "oil painting watercolor gallery exhibitions";

        let near_sim = semantic_similarity(&embedder, resume, near)
            .await
            .expect("similarity");
        let far_sim = semantic_similarity(&embedder, resume, far)
            .await
            .expect("similarity");

        assert!(near_sim > far_sim, "near {near_sim} vs far {far_sim}");
        assert!(near_sim < 1.0);
    }

    #[tokio::test]
    async fn test_empty_text_embeds_to_zero_vector() {
        let embedder = HashingEmbedder::default();
        let vector = embedder.embed("").await.expect("embed");
        assert!(vector.iter().all(|&v| v == 0.0));
        assert_eq!(vector.len(), DEFAULT_DIMENSIONS);
    }

    #[tokio::test]
    async fn test_dimension_floor_is_one() {
        let embedder = HashingEmbedder::new(0, NormalizerConfig::default());
        let vector = embedder.embed("python").await.expect("embed");
        assert_eq!(vector.len(), 1);
    }
}
