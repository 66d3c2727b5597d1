//! Core types for etymology records, root entries and source identification.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::orchestrator::language::normalize_language;

/// Longest definition (in characters) kept verbatim by [`EtymologyRecord::short_meaning`].
const SHORT_MEANING_MAX_CHARS: usize = 50;

/// The consolidated etymology of one word in one language.
///
/// Created empty by [`EtymologyRecord::new`], filled by successive merges
/// of [`PartialRecord`]s, then finalised by scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtymologyRecord {
    /// The surface form being described.
    pub word: String,
    /// The language the word belongs to.
    pub language: String,
    /// Estimated first-attestation year. Negative values denote BCE.
    pub year: Option<i32>,
    /// Human-readable gloss; empty when unknown.
    pub definition: String,
    /// Ancestor words, in the order they were first discovered.
    pub roots: Vec<RootEntry>,
    /// Derived completeness heuristic in `0..=100`. Only set by scoring.
    pub quality_score: u8,
    /// Sources that contributed data to this record.
    pub sources_used: BTreeSet<SourceId>,
}

impl EtymologyRecord {
    /// Create an empty record for `word` in `language`.
    pub fn new(word: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            language: language.into(),
            year: None,
            definition: String::new(),
            roots: Vec::new(),
            quality_score: 0,
            sources_used: BTreeSet::new(),
        }
    }

    /// Returns `true` when no source contributed roots or a year.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.year.is_none()
    }

    /// A condensed gloss: the first sentence of the definition, truncated
    /// to 47 characters plus an ellipsis when longer than 50 characters.
    pub fn short_meaning(&self) -> Option<String> {
        let first_sentence = self.definition.split('.').next().unwrap_or("").trim();
        if first_sentence.is_empty() {
            return None;
        }
        if first_sentence.chars().count() > SHORT_MEANING_MAX_CHARS {
            let head: String = first_sentence
                .chars()
                .take(SHORT_MEANING_MAX_CHARS - 3)
                .collect();
            Some(format!("{head}..."))
        } else {
            Some(first_sentence.to_string())
        }
    }
}

/// An ancestor word from which a record's word is believed to derive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootEntry {
    /// The ancestor word form.
    #[serde(default)]
    pub word: String,
    /// The ancestor language name (free text).
    #[serde(default)]
    pub language: String,
    /// Attestation year, if known.
    #[serde(default)]
    pub year: Option<i32>,
    /// Gloss of the ancestor word, if known.
    #[serde(default)]
    pub definition: Option<String>,
}

impl RootEntry {
    /// Create a root with no year or definition.
    pub fn new(word: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            language: language.into(),
            year: None,
            definition: None,
        }
    }

    /// Builder-style year setter.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Builder-style definition setter.
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// The identity key used for deduplication.
    pub fn key(&self) -> RootKey {
        RootKey::new(&self.word, &self.language)
    }

    /// Whether this root carries a non-empty definition.
    pub(crate) fn has_definition(&self) -> bool {
        self.definition.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}

/// Identity key for root deduplication: `(word, language)` with the word
/// compared case-insensitively and the language in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootKey {
    word: String,
    language: String,
}

impl RootKey {
    /// Build a key from a raw word and a raw (possibly non-canonical) language.
    pub fn new(word: &str, language: &str) -> Self {
        Self {
            word: word.trim().to_lowercase(),
            language: normalize_language(language),
        }
    }
}

/// The etymology data one source returned for one word.
///
/// Every field defaults when absent so that loosely-shaped source payloads
/// deserialise to "no information" instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialRecord {
    /// Which source produced this partial, if known.
    pub source: Option<SourceId>,
    /// The word the source described.
    pub word: Option<String>,
    /// The language the source assigned to the word.
    pub language: Option<String>,
    /// First-attestation year.
    pub year: Option<i32>,
    /// Gloss.
    pub definition: Option<String>,
    /// Root entries.
    pub roots: Vec<RootEntry>,
}

impl PartialRecord {
    /// An empty partial attributed to `source`.
    pub fn from_source(source: SourceId) -> Self {
        Self {
            source: Some(source),
            ..Default::default()
        }
    }

    /// Returns `true` when the partial carries neither roots nor a year.
    pub fn is_unusable(&self) -> bool {
        self.year.is_none() && self.roots.iter().all(|r| r.word.trim().is_empty())
    }
}

/// Data sources that can contribute to an etymology record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SourceId {
    /// Curated seed data shipped with or loaded by the driver.
    Supplementary,
    /// Wiktionary etymology sections.
    Wiktionary,
    /// Online Etymology Dictionary (English only).
    Etymonline,
    /// Free dictionary API, mostly definitions.
    FreeDictionary,
    /// Etymological Wordnet relation dump.
    EtymWordnet,
}

impl SourceId {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Supplementary => "Supplementary",
            Self::Wiktionary => "Wiktionary",
            Self::Etymonline => "Etymonline",
            Self::FreeDictionary => "FreeDictionary",
            Self::EtymWordnet => "EtymWordnet",
        }
    }

    /// Returns all known source variants.
    pub fn all() -> &'static [SourceId] {
        &[
            Self::Supplementary,
            Self::Wiktionary,
            Self::Etymonline,
            Self::FreeDictionary,
            Self::EtymWordnet,
        ]
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
