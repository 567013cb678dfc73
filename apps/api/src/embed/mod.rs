//! Text embedding — converts text into fixed-length vectors for similarity
//! ranking.
//!
//! The provider is an explicit dependency: `AppState` holds an
//! `Arc<dyn Embedder>`, constructed once at startup and passed by handle into
//! every consumer. Tests inject a deterministic fake instead of downloading
//! the real model.

pub mod minilm;

use async_trait::async_trait;

use crate::errors::AppError;

/// A text-embedding model. For a fixed model version, encoding the same text
/// twice yields the same vector.
///
/// Empty or whitespace-only input is rejected with `AppError::Encoding`
/// rather than mapped to a zero vector; callers validate user text before
/// ranking so this acts as a backstop, not a user-facing path.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, AppError>;

    /// Encodes all texts in one model call. Batch items are rejected under
    /// the same empty-input policy as `encode`.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AppError>;

    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Letter-frequency embedder for tests. Deterministic, so identical texts
    /// map to identical vectors and self-similarity is always maximal.
    pub struct CountingEmbedder;

    fn letter_counts(text: &str) -> Vec<f32> {
        let mut counts = vec![0.0f32; 26];
        for c in text.to_lowercase().chars() {
            if c.is_ascii_lowercase() {
                counts[(c as u8 - b'a') as usize] += 1.0;
            }
        }
        counts
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        async fn encode(&self, text: &str) -> Result<Vec<f32>, AppError> {
            if text.trim().is_empty() {
                return Err(AppError::Encoding("empty text".to_string()));
            }
            Ok(letter_counts(text))
        }

        async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AppError> {
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                out.push(self.encode(text).await?);
            }
            Ok(out)
        }

        fn dimension(&self) -> usize {
            26
        }

        fn model_name(&self) -> &str {
            "test-letter-counts"
        }
    }
}
