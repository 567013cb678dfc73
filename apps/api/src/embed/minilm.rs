use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tokio::sync::Mutex;

use crate::embed::Embedder;
use crate::errors::AppError;

/// The pretrained sentence-embedding model used for all matching.
pub const MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";
const DIMENSION: usize = 384;

/// MiniLM embedder using fastembed for ONNX-based inference.
///
/// Produces 384-dimensional embeddings. The ONNX session is behind a mutex,
/// so concurrent requests serialize on the model; each call runs to
/// completion within the requesting session's turn.
pub struct MiniLmEmbedder {
    model: Mutex<TextEmbedding>,
}

impl MiniLmEmbedder {
    /// Loads the model, downloading it on first run (~90MB). Called once in
    /// `main` before the server accepts requests, so there is no lazy-init
    /// race: handlers only ever see the finished handle.
    pub fn new() -> anyhow::Result<Self> {
        let opts =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(true);

        let model = TextEmbedding::try_new(opts)?;
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

#[async_trait]
impl Embedder for MiniLmEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Encoding("cannot encode empty text".to_string()));
        }

        let model = self.model.lock().await;
        model
            .embed(vec![text], None)
            .map_err(|e| AppError::Encoding(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Encoding("model returned no embeddings".to_string()))
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AppError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(i) = texts.iter().position(|t| t.trim().is_empty()) {
            return Err(AppError::Encoding(format!("batch item {i} is empty")));
        }

        let model = self.model.lock().await;
        let embeddings = model
            .embed(texts.to_vec(), None)
            .map_err(|e| AppError::Encoding(e.to_string()))?;

        if embeddings.len() != texts.len() {
            return Err(AppError::Encoding(format!(
                "model returned {} embeddings for {} inputs",
                embeddings.len(),
                texts.len()
            )));
        }
        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }
}
