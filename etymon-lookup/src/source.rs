//! Trait definition for pluggable etymology data sources.
//!
//! Each data source (curated seed data, dictionary sites, relation dumps)
//! implements [`EtymologySource`] to provide a uniform interface for
//! fetching a [`PartialRecord`] for one word.

use async_trait::async_trait;

use crate::error::LookupError;
use crate::types::{PartialRecord, SourceId};

/// A pluggable etymology data source.
///
/// Implementors own their transport and parsing: network I/O, markup
/// scraping or reading a local dump all happen behind [`fetch`]. The
/// orchestrator only sees the resulting partial record.
///
/// Returning `Ok(None)` means "nothing known about this word". Returning
/// `Err` is logged and then treated exactly like `Ok(None)`; it also
/// counts against the source in the circuit breaker.
///
/// All implementations must be `Send + Sync` for concurrent fetches.
///
/// [`fetch`]: EtymologySource::fetch
#[async_trait]
pub trait EtymologySource: Send + Sync {
    /// Fetch whatever this source knows about `word` in `language`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the source could not be queried or its
    /// response could not be interpreted.
    async fn fetch(&self, word: &str, language: &str) -> Result<Option<PartialRecord>, LookupError>;

    /// Returns which [`SourceId`] this implementation represents.
    fn source_id(&self) -> SourceId;

    /// Whether this source has data for `language` at all.
    ///
    /// Sources that return `false` are not queried. Defaults to `true`.
    fn supports(&self, language: &str) -> bool {
        let _ = language;
        true
    }
}
