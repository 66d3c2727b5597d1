//! Error types for the etymon-lookup crate.
//!
//! Only sources and configuration can fail. Merging and scoring never
//! return errors: a source that fails is treated as one that had nothing
//! to contribute.

/// Errors that can occur while configuring lookups or querying a source.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// A source failed to produce a result.
    #[error("source error: {0}")]
    Source(String),

    /// A source did not respond within the configured timeout.
    #[error("source timed out: {0}")]
    Timeout(String),

    /// Invalid lookup configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for etymon-lookup results.
pub type Result<T> = std::result::Result<T, LookupError>;
