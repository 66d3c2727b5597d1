//! Curated etymologies: built-in seed data plus JSON files.
//!
//! A supplementary file is a JSON object keyed by lowercase word:
//!
//! ```json
//! {
//!   "merci": {
//!     "language": "French",
//!     "year": 1300,
//!     "roots": [{ "word": "mercedem", "language": "Latin", "year": 100 }]
//!   }
//! }
//! ```
//!
//! Later files override earlier entries for the same word.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use etymon_lookup::{
    normalize_language, EtymologySource, LookupError, PartialRecord, RootEntry, SourceId,
};

use crate::config::DataConfig;
use crate::error::{EtymonError, Result};

const SEED_DATA: &str = include_str!("../../data/seed_etymologies.json");

#[derive(Debug, Clone, Deserialize)]
struct SupplementaryEntry {
    #[serde(default)]
    language: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    roots: Vec<RootEntry>,
}

/// Source answering from curated etymology entries held in memory.
#[derive(Debug, Default)]
pub struct SupplementarySource {
    entries: HashMap<String, SupplementaryEntry>,
    languages: BTreeSet<String>,
}

impl SupplementarySource {
    /// A source with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A source holding the built-in seed etymologies.
    ///
    /// # Errors
    ///
    /// Returns [`EtymonError::Dataset`] if the embedded seed data is malformed.
    pub fn builtin() -> Result<Self> {
        let mut source = Self::empty();
        source.extend_from_json(SEED_DATA, "built-in seed data")?;
        Ok(source)
    }

    /// Build the source described by `config`: seed data when enabled,
    /// then each supplementary file in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured file cannot be read or parsed.
    pub fn from_config(config: &DataConfig) -> Result<Self> {
        let mut source = if config.builtin_seed {
            Self::builtin()?
        } else {
            Self::empty()
        };
        for path in &config.supplementary_files {
            source.load_file(path)?;
        }
        Ok(source)
    }

    /// Add the entries of a JSON file, replacing existing entries for the
    /// same word. Returns the number of entries read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// supplementary object.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EtymonError::Dataset(format!("cannot read {}: {e}", path.display()))
        })?;
        let count = self.extend_from_json(&content, &path.display().to_string())?;
        tracing::info!(path = %path.display(), count, "loaded supplementary etymologies");
        Ok(count)
    }

    /// Add the entries of a JSON document. `origin` names the document in errors.
    ///
    /// # Errors
    ///
    /// Returns [`EtymonError::Dataset`] if `json` is not a valid supplementary object.
    pub fn extend_from_json(&mut self, json: &str, origin: &str) -> Result<usize> {
        let parsed: HashMap<String, SupplementaryEntry> = serde_json::from_str(json)
            .map_err(|e| EtymonError::Dataset(format!("invalid supplementary data in {origin}: {e}")))?;
        let count = parsed.len();
        for (word, entry) in parsed {
            self.languages.insert(normalize_language(&entry.language));
            self.entries.insert(word.trim().to_lowercase(), entry);
        }
        Ok(count)
    }

    /// Number of words with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no entries are loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn partial_for(&self, word: &str, language: &str) -> Option<PartialRecord> {
        let entry = self.entries.get(&word.trim().to_lowercase())?;
        if normalize_language(&entry.language) != normalize_language(language) {
            return None;
        }
        Some(PartialRecord {
            word: Some(word.to_owned()),
            language: Some(entry.language.clone()),
            year: entry.year,
            definition: entry.definition.clone(),
            roots: entry.roots.clone(),
            ..PartialRecord::from_source(SourceId::Supplementary)
        })
    }
}

#[async_trait]
impl EtymologySource for SupplementarySource {
    async fn fetch(
        &self,
        word: &str,
        language: &str,
    ) -> std::result::Result<Option<PartialRecord>, LookupError> {
        let partial = self.partial_for(word, language);
        if partial.is_some() {
            tracing::debug!(word, language, "supplementary entry found");
        }
        Ok(partial)
    }

    fn source_id(&self) -> SourceId {
        SourceId::Supplementary
    }

    fn supports(&self, language: &str) -> bool {
        self.languages.contains(&normalize_language(language))
    }
}
