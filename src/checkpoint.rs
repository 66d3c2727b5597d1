//! Resumable run progress.
//!
//! A checkpoint records which batches of a word list have been processed
//! and persisted, so an interrupted run resumes at the first pending batch.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Batches completed so far for one word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Length of the word list the batch indices refer to.
    pub total_words: usize,
    /// Indices of batches whose records were persisted.
    #[serde(default)]
    pub processed_batches: BTreeSet<usize>,
    /// When the checkpoint was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Checkpoint {
    /// A checkpoint with no processed batches.
    pub fn new(total_words: usize) -> Self {
        Self {
            total_words,
            processed_batches: BTreeSet::new(),
            updated_at: Utc::now(),
        }
    }

    /// Load the checkpoint at `path`, or start fresh for `total_words`
    /// when no checkpoint exists yet.
    ///
    /// A checkpoint written for a word list of a different length is
    /// discarded: its batch indices no longer line up.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path, total_words: usize) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new(total_words));
        }
        let content = std::fs::read_to_string(path)?;
        let checkpoint: Self = serde_json::from_str(&content)?;
        if checkpoint.total_words != total_words {
            tracing::warn!(
                path = %path.display(),
                saved = checkpoint.total_words,
                current = total_words,
                "word list changed, ignoring checkpoint"
            );
            return Ok(Self::new(total_words));
        }
        tracing::info!(
            path = %path.display(),
            batches = checkpoint.processed_batches.len(),
            "resuming from checkpoint"
        );
        Ok(checkpoint)
    }

    /// Write the checkpoint to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Whether batch `index` was already processed.
    pub fn is_processed(&self, index: usize) -> bool {
        self.processed_batches.contains(&index)
    }

    /// Mark batch `index` processed.
    pub fn mark_processed(&mut self, index: usize) {
        self.processed_batches.insert(index);
        self.updated_at = Utc::now();
    }
}
