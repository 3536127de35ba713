//! Embedding backends behind an injectable provider trait

use crate::config::{EmbeddingBackend, EmbeddingConfig};
use crate::error::{PersonaRankerError, Result};
use log::info;
use model2vec_rs::model::StaticModel;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Instant;

/// Maps text to fixed-dimension vectors. `embed_batch` returns one vector
/// per input, index-aligned with the input slice.
pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
    fn dimensions(&self) -> usize;
    fn model_id(&self) -> &str;
}

/// Builds the provider the configuration asks for. Model loading failures
/// abort the run before any document work.
pub fn build_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.backend {
        EmbeddingBackend::Model2Vec => {
            Ok(Box::new(Model2VecProvider::load(&config.model)?))
        }
        EmbeddingBackend::Hashed => {
            Ok(Box::new(HashedProvider::new(config.hashed_dimensions)))
        }
    }
}

/// Static-embedding backend wrapping a Model2Vec model.
pub struct Model2VecProvider {
    model: StaticModel,
    dimensions: usize,
    model_id: String,
}

impl Model2VecProvider {
    pub fn load(model_id: &str) -> Result<Self> {
        let start = Instant::now();
        info!("Loading embedding model: {}", model_id);

        let model = StaticModel::from_pretrained(model_id, None, None, None).map_err(|e| {
            PersonaRankerError::ModelInitialization(format!(
                "Failed to load '{}': {}",
                model_id, e
            ))
        })?;

        // The model does not report its width; probe it once.
        let dimensions = model.encode_single("dimension probe").len();
        if dimensions == 0 {
            return Err(PersonaRankerError::ModelInitialization(format!(
                "Model '{}' produced an empty embedding",
                model_id
            )));
        }

        info!(
            "Embedding model ready ({} dimensions) in {:.2?}",
            dimensions,
            start.elapsed()
        );
        Ok(Self {
            model,
            dimensions,
            model_id: model_id.to_string(),
        })
    }
}

impl EmbeddingProvider for Model2VecProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.model.encode_single(text))
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let vectors = self.model.encode(texts);
        if vectors.len() != texts.len() {
            return Err(PersonaRankerError::Embedding(format!(
                "Batch returned {} vectors for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Deterministic bag-of-hashed-tokens backend for offline runs and tests.
/// Identical text always produces identical vectors.
pub struct HashedProvider {
    dimensions: usize,
    model_id: String,
}

impl HashedProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            model_id: format!("hashed-{}", dimensions),
        }
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in text.to_lowercase().split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let hash = hasher.finish();
            let index = (hash % self.dimensions as u64) as usize;
            let sign = if hash & (1 << 63) == 0 { 1.0 } else { -1.0 };
            vector[index] += sign;
        }

        let magnitude = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }
        vector
    }
}

impl EmbeddingProvider for HashedProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.vectorize(text)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
