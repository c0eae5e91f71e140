//! Sentence-transformer embeddings through `fastembed` (ONNX runtime).

use ::fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::error::{Error, Result};

use super::Embedder;

/// Default sentence-transformer model.
pub const MINILM_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

const SUPPORTED_MODELS: &[(&str, EmbeddingModel)] = &[
    (MINILM_MODEL_ID, EmbeddingModel::AllMiniLML6V2),
    ("BAAI/bge-small-en-v1.5", EmbeddingModel::BGESmallENV15),
    ("BAAI/bge-base-en-v1.5", EmbeddingModel::BGEBaseENV15),
];

/// Embedder backed by a locally cached ONNX model.
pub struct FastEmbedder {
    model: TextEmbedding,
    id: String,
}

impl FastEmbedder {
    /// Load the model named by `model_id`, downloading it on first use.
    pub fn try_new(model_id: &str) -> Result<Self> {
        let model_name = SUPPORTED_MODELS
            .iter()
            .find(|(id, _)| *id == model_id)
            .map(|(_, model)| model.clone())
            .ok_or_else(|| Error::Embedding(format!("unknown embedding model '{}'", model_id)))?;

        log::info!("Loading embedding model {}", model_id);
        let mut options = InitOptions::default();
        options.model_name = model_name;
        options.show_download_progress = true;

        let model = TextEmbedding::try_new(options)
            .map_err(|e| Error::Embedding(format!("failed to load '{}': {}", model_id, e)))?;

        Ok(Self {
            model,
            id: model_id.to_string(),
        })
    }
}

impl Embedder for FastEmbedder {
    fn model_id(&self) -> &str {
        &self.id
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| Error::Embedding(e.to_string()))
    }
}
