//! Error types for the etymon batch driver.

/// Top-level error type for batch etymology generation.
#[derive(Debug, thiserror::Error)]
pub enum EtymonError {
    /// Lookup setup error from the lookup crate.
    #[error("lookup error: {0}")]
    Lookup(#[from] etymon_lookup::LookupError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A local dataset (word list, seed data, relation dump) could not be read.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisting a finished batch failed.
    #[error("output error: {0}")]
    Output(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, EtymonError>;
