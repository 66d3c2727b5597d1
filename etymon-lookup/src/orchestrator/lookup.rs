//! Core lookup orchestrator: concurrent source fan-out, serial merge, score.
//!
//! Sources are queried concurrently, but their partial records are merged
//! strictly in configured source order so that first-source-wins and root
//! ordering stay deterministic regardless of which source answers first.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cache::{CacheKey, RecordCache};
use crate::circuit_breaker::{CircuitBreaker, CircuitState};
use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::source::EtymologySource;
use crate::types::{EtymologyRecord, PartialRecord, SourceId};

use super::eras::estimate_root_years;
use super::language::normalize_language;
use super::merge::merge;
use super::scoring::score;

type FetchOutcome = (SourceId, Result<Option<PartialRecord>, LookupError>);

/// Looks words up across an ordered list of sources.
///
/// Owns the record cache and the per-source circuit breaker. Safe to share
/// between concurrent workers: each [`lookup`](Self::lookup) builds and
/// returns its own record.
pub struct Etymologist {
    config: LookupConfig,
    sources: Vec<Arc<dyn EtymologySource>>,
    cache: RecordCache,
    breaker: Mutex<CircuitBreaker>,
}

impl Etymologist {
    /// Create an etymologist querying `sources` in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Config`] if `config` is invalid or two
    /// sources share a [`SourceId`].
    pub fn new(
        config: LookupConfig,
        sources: Vec<Arc<dyn EtymologySource>>,
    ) -> Result<Self, LookupError> {
        config.validate()?;

        let mut seen = BTreeSet::new();
        for source in &sources {
            let id = source.source_id();
            if !seen.insert(id) {
                return Err(LookupError::Config(format!("duplicate source: {id}")));
            }
        }

        Ok(Self {
            cache: RecordCache::new(&config),
            breaker: Mutex::new(CircuitBreaker::from_config(&config)),
            config,
            sources,
        })
    }

    /// The configuration this etymologist was built with.
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Configured sources, in merge order.
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(|s| s.source_id()).collect()
    }

    /// Circuit state of every source that has been queried.
    pub fn source_health(&self) -> Vec<(SourceId, CircuitState, u32)> {
        self.breaker().health_report()
    }

    /// Drop all cached records.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Build the consolidated, scored record for `word` in `language`.
    ///
    /// # Pipeline
    ///
    /// 1. Normalise the word (trim, lowercase) and the language name
    /// 2. Serve from the record cache when possible
    /// 3. Select sources that support the language and whose circuit allows a fetch
    /// 4. Fetch from all selected sources concurrently, each under the configured timeout
    /// 5. Record per-source success/failure in the circuit breaker
    /// 6. Merge partials in source order; failures count as "no data"
    /// 7. Optionally estimate missing root years, then score
    ///
    /// Never fails: a word no source knows yields an empty record scoring 0.
    pub async fn lookup(&self, word: &str, language: &str) -> EtymologyRecord {
        let word = word.trim().to_lowercase();
        let language = normalize_language(language);
        let key = CacheKey::new(&word, &language);

        if let Some(cached) = self.cache.get(&key).await {
            tracing::trace!(%word, %language, "record cache hit");
            return cached;
        }

        let (selected, skipped) = self.select_sources(&language);
        let pending = PendingOutcomes::new(&self.breaker, &selected);
        let outcomes = self.fetch_all(&selected, &word, &language).await;
        pending.settle(&outcomes);

        let mut record = EtymologyRecord::new(word, language);
        let mut failures = 0usize;
        for (source, outcome) in outcomes {
            match outcome {
                Ok(Some(mut partial)) => {
                    partial.source.get_or_insert(source);
                    if !merge(&mut record, Some(&partial)) {
                        tracing::debug!(%source, word = %record.word, "source contributed nothing usable");
                    }
                }
                Ok(None) => {
                    tracing::debug!(%source, word = %record.word, "source has no entry");
                }
                Err(err) => {
                    failures += 1;
                    tracing::warn!(%source, word = %record.word, error = %err, "source fetch failed");
                }
            }
        }

        if self.config.estimate_root_years {
            let dated = estimate_root_years(&mut record);
            if dated > 0 {
                tracing::trace!(word = %record.word, dated, "estimated root years");
            }
        }
        score(&mut record);

        tracing::debug!(
            word = %record.word,
            language = %record.language,
            roots = record.roots.len(),
            quality = record.quality_score,
            "lookup finished"
        );

        // A failed or skipped source may answer next time; don't pin the gap in the cache.
        if failures == 0 && skipped == 0 {
            self.cache.insert(key, record.clone()).await;
        }
        record
    }

    /// Sources to query for `language`, and how many supporting sources
    /// the circuit breaker held back.
    fn select_sources(&self, language: &str) -> (Vec<Arc<dyn EtymologySource>>, usize) {
        let mut breaker = self.breaker();
        let mut skipped = 0;
        let selected = self
            .sources
            .iter()
            .filter(|source| source.supports(language))
            .filter(|source| {
                let id = source.source_id();
                let allowed = breaker.should_attempt(id);
                if !allowed {
                    tracing::debug!(source = %id, "skipping source with open circuit");
                    skipped += 1;
                }
                allowed
            })
            .cloned()
            .collect();
        (selected, skipped)
    }

    async fn fetch_all(
        &self,
        sources: &[Arc<dyn EtymologySource>],
        word: &str,
        language: &str,
    ) -> Vec<FetchOutcome> {
        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let fetches = sources.iter().map(|source| async move {
            let id = source.source_id();
            let outcome = match tokio::time::timeout(timeout, source.fetch(word, language)).await {
                Ok(result) => result,
                Err(_) => Err(LookupError::Timeout(format!(
                    "{id} exceeded {}s",
                    timeout.as_secs()
                ))),
            };
            (id, outcome)
        });
        futures::future::join_all(fetches).await
    }

    fn breaker(&self) -> MutexGuard<'_, CircuitBreaker> {
        self.breaker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Breaker bookkeeping for fetches that have been admitted but not yet
/// settled. If the lookup is dropped mid-fetch, any half-open probes it
/// held are released instead of blocking the source forever.
struct PendingOutcomes<'a> {
    breaker: &'a Mutex<CircuitBreaker>,
    sources: Vec<SourceId>,
}

impl<'a> PendingOutcomes<'a> {
    fn new(breaker: &'a Mutex<CircuitBreaker>, sources: &[Arc<dyn EtymologySource>]) -> Self {
        Self {
            breaker,
            sources: sources.iter().map(|s| s.source_id()).collect(),
        }
    }

    /// Record each outcome in the breaker.
    fn settle(mut self, outcomes: &[FetchOutcome]) {
        let mut breaker = self.breaker.lock().unwrap_or_else(PoisonError::into_inner);
        for (source, outcome) in outcomes {
            match outcome {
                Ok(_) => breaker.record_success(*source),
                Err(_) => breaker.record_failure(*source),
            }
        }
        self.sources.clear();
    }
}

impl Drop for PendingOutcomes<'_> {
    fn drop(&mut self) {
        if self.sources.is_empty() {
            return;
        }
        let mut breaker = self.breaker.lock().unwrap_or_else(PoisonError::into_inner);
        for source in self.sources.drain(..) {
            breaker.release_probe(source);
        }
    }
}

impl std::fmt::Debug for Etymologist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Etymologist")
            .field("config", &self.config)
            .field("sources", &self.source_ids())
            .field("cache", &self.cache)
            .finish()
    }
}
