//! Quality scoring for finalised etymology records.
//!
//! Four weighted dimensions, summing to at most 100:
//!
//! | Dimension | Points |
//! |---|---|
//! | Roots | `min(25, 10 * roots)` |
//! | Year | 20 if known |
//! | Definition | 20 if at least 10 characters |
//! | Lineage consistency | 35 if the record has roots and every root language is a plausible ancestor |
//!
//! Consistency is all-or-nothing: a single implausible root forfeits it.

use crate::types::EtymologyRecord;

use super::lineage::is_plausible_ancestor;

/// Maximum points for the roots dimension.
pub const ROOTS_POINTS: u8 = 25;
/// Points contributed by each distinct root, up to [`ROOTS_POINTS`].
pub const POINTS_PER_ROOT: u8 = 10;
/// Points for a known first-attestation year.
pub const YEAR_POINTS: u8 = 20;
/// Points for a meaningful definition.
pub const DEFINITION_POINTS: u8 = 20;
/// Points for every root belonging to an expected ancestor language.
pub const CONSISTENCY_POINTS: u8 = 35;
/// Definitions shorter than this (in characters) earn nothing.
pub const MIN_DEFINITION_CHARS: usize = 10;

/// Calculate the quality score of `record` without modifying it.
///
/// Depends only on `roots`, `year`, `definition` and `language`; the
/// current `quality_score` is ignored, so rescoring is idempotent.
pub fn compute_score(record: &EtymologyRecord) -> u8 {
    let total = roots_points(record)
        + year_points(record)
        + definition_points(record)
        + consistency_points(record);
    total.min(100)
}

/// Score `record`, store the result in `quality_score` and return it.
pub fn score(record: &mut EtymologyRecord) -> u8 {
    let score = compute_score(record);
    record.quality_score = score;
    score
}

fn roots_points(record: &EtymologyRecord) -> u8 {
    // Three roots already exceed the cap.
    let counted = record.roots.len().min(3) as u8;
    (counted * POINTS_PER_ROOT).min(ROOTS_POINTS)
}

fn year_points(record: &EtymologyRecord) -> u8 {
    if record.year.is_some() {
        YEAR_POINTS
    } else {
        0
    }
}

fn definition_points(record: &EtymologyRecord) -> u8 {
    if record.definition.trim().chars().count() >= MIN_DEFINITION_CHARS {
        DEFINITION_POINTS
    } else {
        0
    }
}

fn consistency_points(record: &EtymologyRecord) -> u8 {
    if record.roots.is_empty() {
        return 0;
    }
    let consistent = record
        .roots
        .iter()
        .all(|root| is_plausible_ancestor(&record.language, &root.language));
    if consistent {
        CONSISTENCY_POINTS
    } else {
        tracing::debug!(
            word = %record.word,
            language = %record.language,
            "root languages inconsistent with expected lineage"
        );
        0
    }
}
