//! Etymon: batch etymology generation.
//!
//! Looks up every word of a word list across several etymology sources,
//! folds their partial answers into one scored record per word and writes
//! each record out as JSON:
//! Word list → batches → concurrent lookups → merge & score → JSON sink
//!
//! # Architecture
//!
//! - **Lookup**: merging, scoring and source fan-out live in `etymon-lookup`
//! - **Sources**: curated seed data and an Etymological Wordnet dump
//! - **Batch driver**: bounded-concurrency batches with a resumable checkpoint
//! - **Output**: one JSON document per word, with a condensed gloss

pub mod batch;
pub mod checkpoint;
pub mod config;
pub mod error;
pub mod output;
pub mod sources;
pub mod stats;
pub mod word_list;

pub use batch::{plan_batches, process_batch, run, Batch, BatchOutcome, RunSummary};
pub use checkpoint::Checkpoint;
pub use config::EtymonConfig;
pub use error::{EtymonError, Result};
pub use etymon_lookup::{EtymologyRecord, Etymologist};
pub use sources::{build_etymologist, local_sources};
pub use stats::BatchStats;
