//! Lookup orchestrator: concurrent fetches, language normalisation, merge, score.
//!
//! This module fans lookups out to every configured source concurrently,
//! folds the resulting partial records into one record in source order,
//! deduplicating roots by normalised identity key, and computes the
//! record's quality score against the expected language lineage.

pub mod eras;
pub mod language;
pub mod lineage;
pub mod lookup;
pub mod merge;
pub mod scoring;
