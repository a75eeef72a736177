//! Embedding backends — pluggable, trait-based vectorizers behind
//! `Arc<dyn Embedder>` in app state.
//!
//! Default: `HashingEmbedder` (pure-Rust, deterministic, no network).
//! Optional: `HttpEmbedder` against any OpenAI-compatible `/embeddings`
//! endpoint, selected at startup via `EMBEDDER_BACKEND`.

pub mod hashing;
pub mod http;

use async_trait::async_trait;
use thiserror::Error;

/// Failures from an embedding backend. Surfaced to callers as-is; whether
/// a failure degrades the match or aborts it is the engine's decision, not
/// the backend's.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding endpoint returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("embedding response could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("embedding endpoint returned no vector")]
    EmptyVector,

    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// An embedding backend. Implement this to swap vectorizers without
/// touching the engine, handlers, or scoring code.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    /// Short backend label for logs and the health endpoint.
    fn name(&self) -> &'static str;
}

/// Cosine similarity between two vectors of equal dimension.
///
/// A zero vector (nothing recognizable in the text) has no direction;
/// similarity against it is 0 rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, EmbedError> {
    if a.len() != b.len() {
        return Err(EmbedError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Embeds both texts and returns their cosine similarity clamped to [0, 1].
/// Raw cosine can dip below zero on near-orthogonal vocabularies; negative
/// affinity carries no extra meaning for matching, so it floors at zero.
pub async fn semantic_similarity(
    embedder: &dyn Embedder,
    left: &str,
    right: &str,
) -> Result<f64, EmbedError> {
    let a = embedder.embed(left).await?;
    let b = embedder.embed(right).await?;
    if a.is_empty() || b.is_empty() {
        return Err(EmbedError::EmptyVector);
    }
    Ok(cosine_similarity(&a, &b)?.clamp(0.0, 1.0))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
