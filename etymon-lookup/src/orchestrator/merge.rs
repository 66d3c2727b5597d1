//! Folding partial records into an accumulating etymology record.
//!
//! Scalar fields follow first-source-wins (`year`) and longer-wins
//! (`definition`). Roots are deduplicated by [`RootKey`]: a root already
//! present is only enriched with fields it lacks, never overwritten, so a
//! later, richer source can fill in an earlier, sparser entry.
//!
//! [`RootKey`]: crate::types::RootKey

use crate::types::{EtymologyRecord, PartialRecord, RootEntry};

use super::language::{is_known_language, normalize_language};

/// Merge one source's partial record into `target`.
///
/// A `None` partial, or one carrying neither roots nor a year, is a no-op.
/// Missing fields are treated as "no information"; this function never
/// fails.
///
/// Returns `true` if the partial was merged, `false` for the no-op case.
pub fn merge(target: &mut EtymologyRecord, partial: Option<&PartialRecord>) -> bool {
    let Some(partial) = partial else {
        return false;
    };
    if partial.is_unusable() {
        tracing::trace!(source = ?partial.source, "partial carries no roots or year");
        return false;
    }

    if target.year.is_none() {
        target.year = partial.year;
    }

    if let Some(definition) = partial.definition.as_deref() {
        let definition = definition.trim();
        if !definition.is_empty()
            && (target.definition.is_empty()
                || definition.chars().count() > target.definition.chars().count())
        {
            target.definition = definition.to_string();
        }
    }

    let mut added = 0usize;
    for root in &partial.roots {
        if merge_root(&mut target.roots, root) {
            added += 1;
        }
    }

    if let Some(source) = partial.source {
        target.sources_used.insert(source);
    }

    tracing::debug!(
        word = %target.word,
        source = ?partial.source,
        added,
        total = target.roots.len(),
        "merged partial record"
    );
    true
}

/// Add `root` to `roots` or enrich the existing entry with the same key.
///
/// Returns `true` if a new entry was appended.
fn merge_root(roots: &mut Vec<RootEntry>, root: &RootEntry) -> bool {
    let word = root.word.trim();
    if word.is_empty() {
        return false;
    }

    let key = root.key();
    if let Some(existing) = roots.iter_mut().find(|r| r.key() == key) {
        if existing.year.is_none() {
            existing.year = root.year;
        }
        if !existing.has_definition() && root.has_definition() {
            existing.definition = root.definition.clone();
        }
        return false;
    }

    if !root.language.trim().is_empty() && !is_known_language(&root.language) {
        tracing::trace!(language = %root.language, "root language not in alias table");
    }

    roots.push(RootEntry {
        word: word.to_string(),
        language: normalize_language(&root.language),
        year: root.year,
        definition: root.definition.clone().filter(|d| !d.trim().is_empty()),
    });
    true
}
