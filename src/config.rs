//! Configuration management for the persona ranker

use crate::error::{PersonaRankerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub embedding: EmbeddingConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding documents/, the persona file and the job file.
    pub input_dir: PathBuf,
    /// Directory the result file is written into.
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    /// Hugging Face repo id or local path for the model2vec backend.
    pub model: String,
    /// Vector width of the hashed backend.
    pub hashed_dimensions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    Model2Vec,
    Hashed,
}

impl std::str::FromStr for EmbeddingBackend {
    type Err = PersonaRankerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "model2vec" => Ok(EmbeddingBackend::Model2Vec),
            "hashed" => Ok(EmbeddingBackend::Hashed),
            other => Err(PersonaRankerError::Configuration(format!(
                "Unknown embedding backend '{}' (expected 'model2vec' or 'hashed')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub persona_weight: f32,
    pub job_weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty_json: bool,
    /// Rows shown in the console summary after a run.
    pub top_results: usize,
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                input_dir: PathBuf::from("input"),
                output_dir: PathBuf::from("output"),
            },
            embedding: EmbeddingConfig {
                backend: EmbeddingBackend::Model2Vec,
                model: "minishlab/M2V_base_output".to_string(),
                hashed_dimensions: 256,
            },
            scoring: ScoringConfig {
                persona_weight: 0.4,
                job_weight: 0.6,
            },
            output: OutputConfig {
                pretty_json: true,
                top_results: 5,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            PersonaRankerError::Configuration(format!("Failed to parse config: {}", e))
        })?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            PersonaRankerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("persona-ranker")
            .join("config.toml")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            PersonaRankerError::Configuration(format!("Failed to serialize config: {}", e))
        })
    }
}
