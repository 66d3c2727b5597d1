//! Configuration types for batch etymology generation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use etymon_lookup::LookupConfig;

use crate::error::{EtymonError, Result};

/// Top-level configuration for a generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtymonConfig {
    /// Source timeouts, caching and circuit breaking.
    pub lookup: LookupConfig,
    /// Batch sizing and concurrency.
    pub batch: BatchConfig,
    /// Local datasets used as sources.
    pub data: DataConfig,
    /// Output rendering.
    pub output: OutputConfig,
}

/// Batch processing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Language every word in the run belongs to.
    pub language: String,
    /// Words per batch. A checkpoint is written after each batch.
    pub batch_size: usize,
    /// Words looked up concurrently within a batch.
    pub concurrency: usize,
    /// Stop after this many words. `None` processes the whole list.
    pub max_words: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            language: "English".to_owned(),
            batch_size: 100,
            concurrency: 4,
            max_words: None,
        }
    }
}

/// Local dataset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Include the built-in seed etymologies.
    pub builtin_seed: bool,
    /// JSON files of curated etymologies keyed by word.
    pub supplementary_files: Vec<PathBuf>,
    /// Etymological Wordnet TSV dump.
    pub wordnet_dump: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            builtin_seed: true,
            supplementary_files: Vec::new(),
            wordnet_dump: None,
        }
    }
}

/// Output rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl EtymonConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| EtymonError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| EtymonError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EtymonError::Config`] for an empty language, zero batch
    /// size or concurrency, or an invalid lookup section.
    pub fn validate(&self) -> Result<()> {
        if self.batch.language.trim().is_empty() {
            return Err(EtymonError::Config("language must not be empty".into()));
        }
        if self.batch.batch_size == 0 {
            return Err(EtymonError::Config(
                "batch_size must be greater than 0".into(),
            ));
        }
        if self.batch.concurrency == 0 {
            return Err(EtymonError::Config(
                "concurrency must be greater than 0".into(),
            ));
        }
        self.lookup.validate()?;
        Ok(())
    }
}
