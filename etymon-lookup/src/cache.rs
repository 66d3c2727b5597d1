//! In-memory cache of finalised etymology records.
//!
//! Keyed by the (lowercased word, canonical language) pair. Uses [`moka`]
//! for async-friendly caching with configurable TTL and automatic
//! eviction. A TTL of zero disables the cache entirely.

use std::time::Duration;

use moka::future::Cache;

use crate::config::LookupConfig;
use crate::orchestrator::language::normalize_language;
use crate::types::EtymologyRecord;

/// Composite cache key: normalised word + canonical language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased, trimmed word.
    word: String,
    /// Canonical language name.
    language: String,
}

impl CacheKey {
    /// Build a deterministic cache key from a word and language.
    pub fn new(word: &str, language: &str) -> Self {
        Self {
            word: word.trim().to_lowercase(),
            language: normalize_language(language),
        }
    }
}

/// Cache of records already looked up and scored.
#[derive(Clone)]
pub struct RecordCache {
    inner: Option<Cache<CacheKey, EtymologyRecord>>,
}

impl RecordCache {
    /// Build a cache from the TTL and capacity in `config`.
    pub fn new(config: &LookupConfig) -> Self {
        if config.cache_ttl_seconds == 0 {
            return Self::disabled();
        }
        let inner = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .build();
        Self { inner: Some(inner) }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Whether this cache stores records.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Look up a cached record. Returns `None` on miss or when disabled.
    pub async fn get(&self, key: &CacheKey) -> Option<EtymologyRecord> {
        match &self.inner {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    /// Insert a finalised record.
    pub async fn insert(&self, key: CacheKey, record: EtymologyRecord) {
        if let Some(cache) = &self.inner {
            cache.insert(key, record).await;
        }
    }

    /// Drop every cached record.
    pub fn clear(&self) {
        if let Some(cache) = &self.inner {
            cache.invalidate_all();
        }
    }
}

impl std::fmt::Debug for RecordCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordCache")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
