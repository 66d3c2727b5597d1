//! # etymon-lookup
//!
//! Multi-source etymology lookup.
//!
//! Each data source returns a partial, frequently incomplete record for a
//! word. This crate fans a lookup out to every configured source, folds the
//! partial records into one consolidated [`EtymologyRecord`] and rates how
//! complete and consistent the result looks.
//!
//! ## Design
//!
//! - Sources implement [`EtymologySource`]; transport and parsing stay behind the trait
//! - Fetches run concurrently; merges run serially in source order
//! - `year` is first-source-wins, `definition` is longer-wins
//! - Roots are deduplicated by `(word, language)` after language-name normalisation
//! - Quality score (0–100) is recomputed from scratch on every call
//! - Source failures degrade to "no data"; a lookup never fails
//! - Finalised records are cached in memory; repeatedly failing sources are circuit-broken
//!
//! ## Example
//!
//! ```
//! use etymon_lookup::{merge, score, EtymologyRecord, PartialRecord, RootEntry, SourceId};
//!
//! let mut record = EtymologyRecord::new("etymology", "English");
//! let partial = PartialRecord {
//!     year: Some(1398),
//!     roots: vec![RootEntry::new("etymologia", "Latin").with_year(1200)],
//!     ..PartialRecord::from_source(SourceId::Wiktionary)
//! };
//! merge(&mut record, Some(&partial));
//! assert_eq!(record.year, Some(1398));
//! assert!(score(&mut record) > 0);
//! ```

pub mod cache;
pub mod circuit_breaker;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod source;
pub mod types;

pub use config::LookupConfig;
pub use error::{LookupError, Result};
pub use orchestrator::language::normalize_language;
pub use orchestrator::lookup::Etymologist;
pub use orchestrator::merge::merge;
pub use orchestrator::scoring::{compute_score, score};
pub use source::EtymologySource;
pub use types::{EtymologyRecord, PartialRecord, RootEntry, RootKey, SourceId};
