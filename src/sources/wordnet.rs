//! Etymological Wordnet relation dump.
//!
//! The dump is a three-column TSV file of typed relations between
//! language-tagged words:
//!
//! ```text
//! eng: etymology	rel:etymology	lat: etymologia
//! lat: etymologia	rel:etymological_origin_of	eng: etymology
//! ```
//!
//! Only the two etymology relations are indexed; the rest of the dump
//! (derivations, orthographic variants) is skipped. Root languages are kept
//! as the dump's codes and canonicalised later by the merger.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use async_trait::async_trait;

use etymon_lookup::{
    normalize_language, EtymologySource, LookupError, PartialRecord, RootEntry, SourceId,
};

use crate::error::{EtymonError, Result};

const REL_ETYMOLOGY: &str = "rel:etymology";
const REL_ORIGIN_OF: &str = "rel:etymological_origin_of";

/// Source answering from an in-memory index of an Etymological Wordnet dump.
#[derive(Debug, Default)]
pub struct WordnetSource {
    /// `(canonical language, lowercase word)` → roots in dump order.
    index: HashMap<(String, String), Vec<RootEntry>>,
    languages: BTreeSet<String>,
    relations: usize,
}

/// A `code: word` column.
fn parse_tagged(column: &str) -> Option<(&str, &str)> {
    let (code, word) = column.split_once(':')?;
    let (code, word) = (code.trim(), word.trim());
    if code.is_empty() || word.is_empty() {
        None
    } else {
        Some((code, word))
    }
}

impl WordnetSource {
    /// Index a dump read line by line from `reader`.
    ///
    /// Lines that are not well-formed relations are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EtymonError::Dataset`] if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut source = Self::default();
        let mut skipped = 0usize;

        for line in reader.lines() {
            let line = line.map_err(|e| EtymonError::Dataset(format!("wordnet read failed: {e}")))?;
            if line.trim().is_empty() {
                continue;
            }
            if !source.index_line(&line) {
                skipped += 1;
            }
        }

        tracing::debug!(
            relations = source.relations,
            words = source.index.len(),
            skipped,
            "indexed wordnet dump"
        );
        Ok(source)
    }

    /// Index the dump at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EtymonError::Dataset`] if the file cannot be opened or read.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| EtymonError::Dataset(format!("cannot open {}: {e}", path.display())))?;
        let source = Self::from_reader(BufReader::new(file))?;
        tracing::info!(path = %path.display(), relations = source.relations, "loaded wordnet dump");
        Ok(source)
    }

    /// Returns `false` when the line is not a usable relation.
    fn index_line(&mut self, line: &str) -> bool {
        let mut columns = line.split('\t');
        let (Some(left), Some(relation), Some(right)) =
            (columns.next(), columns.next(), columns.next())
        else {
            return false;
        };

        let (Some(left), Some(right)) = (parse_tagged(left), parse_tagged(right)) else {
            return false;
        };

        let ((word_code, word), (root_code, root)) = match relation.trim() {
            REL_ETYMOLOGY => (left, right),
            REL_ORIGIN_OF => (right, left),
            _ => return false,
        };

        let language = normalize_language(word_code);
        let roots = self
            .index
            .entry((language.clone(), word.to_lowercase()))
            .or_default();
        let entry = RootEntry::new(root, root_code);
        if !roots.contains(&entry) {
            roots.push(entry);
            self.relations += 1;
        }
        self.languages.insert(language);
        true
    }

    /// Number of distinct etymology relations indexed.
    pub fn relation_count(&self) -> usize {
        self.relations
    }

    /// Number of words with at least one root.
    pub fn word_count(&self) -> usize {
        self.index.len()
    }

    fn roots_for(&self, word: &str, language: &str) -> Option<&[RootEntry]> {
        self.index
            .get(&(normalize_language(language), word.trim().to_lowercase()))
            .map(Vec::as_slice)
    }
}

#[async_trait]
impl EtymologySource for WordnetSource {
    async fn fetch(
        &self,
        word: &str,
        language: &str,
    ) -> std::result::Result<Option<PartialRecord>, LookupError> {
        Ok(self.roots_for(word, language).map(|roots| PartialRecord {
            word: Some(word.to_owned()),
            language: Some(language.to_owned()),
            roots: roots.to_vec(),
            ..PartialRecord::from_source(SourceId::EtymWordnet)
        }))
    }

    fn source_id(&self) -> SourceId {
        SourceId::EtymWordnet
    }

    fn supports(&self, language: &str) -> bool {
        self.languages.contains(&normalize_language(language))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::io::Cursor;

    const DUMP: &str = "\
eng: etymology\trel:etymology\tlat: etymologia
eng: etymology\trel:etymology\tgrc: ἐτυμολογία
lat: etymologia\trel:etymological_origin_of\teng: etymology
eng: etymology\trel:is_derived_from\teng: etymon
fra: château\trel:etymology\tlat: castellum
not a relation line
eng:\trel:etymology\tlat: nothing

eng: Democracy\trel:etymology\tfrm: democratie
";

    fn source() -> WordnetSource {
        WordnetSource::from_reader(Cursor::new(DUMP)).expect("parse")
    }

    #[test]
    fn indexes_etymology_relations_only() {
        let source = source();
        assert_eq!(source.relation_count(), 4);
        assert_eq!(source.word_count(), 3);
    }

    #[test]
    fn reversed_origin_relation_deduplicated() {
        let source = source();
        let roots = source.roots_for("etymology", "English").expect("roots");
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0], RootEntry::new("etymologia", "lat"));
        assert_eq!(roots[1], RootEntry::new("ἐτυμολογία", "grc"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let source = source();
        assert!(source.roots_for("DEMOCRACY", "eng").is_some());
    }

    #[test]
    fn supports_indexed_languages() {
        let source = source();
        assert!(source.supports("English"));
        assert!(source.supports("French"));
        assert!(!source.supports("Latin"));
    }

    #[tokio::test]
    async fn fetch_returns_partial() {
        let source = source();
        let partial = source
            .fetch("château", "French")
            .await
            .expect("never fails")
            .expect("roots");
        assert_eq!(partial.source, Some(SourceId::EtymWordnet));
        assert!(partial.year.is_none());
        assert_eq!(partial.roots, vec![RootEntry::new("castellum", "lat")]);
    }

    #[tokio::test]
    async fn fetch_unknown_word_returns_none() {
        let source = source();
        assert!(source.fetch("xyzzy123", "English").await.expect("ok").is_none());
    }

    #[test]
    fn empty_dump_is_empty_index() {
        let source = WordnetSource::from_reader(Cursor::new("")).expect("parse");
        assert_eq!(source.relation_count(), 0);
        assert!(!source.supports("English"));
    }

    #[test]
    fn open_missing_file_fails() {
        let err = WordnetSource::open(Path::new("/nonexistent/etymwn.tsv")).unwrap_err();
        assert!(err.to_string().starts_with("dataset error"));
    }
}
