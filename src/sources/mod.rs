//! Local etymology sources backed by on-disk datasets.

pub mod supplementary;
pub mod wordnet;

use std::sync::Arc;

use etymon_lookup::{EtymologySource, Etymologist};

use crate::config::{DataConfig, EtymonConfig};
use crate::error::Result;

pub use supplementary::SupplementarySource;
pub use wordnet::WordnetSource;

/// Build the local sources described by `config`, in merge order:
/// curated entries first, then the Wordnet dump when one is configured.
///
/// # Errors
///
/// Returns an error if any configured dataset cannot be loaded.
pub fn local_sources(config: &DataConfig) -> Result<Vec<Arc<dyn EtymologySource>>> {
    let mut sources: Vec<Arc<dyn EtymologySource>> =
        vec![Arc::new(SupplementarySource::from_config(config)?)];
    if let Some(path) = &config.wordnet_dump {
        sources.push(Arc::new(WordnetSource::open(path)?));
    }
    Ok(sources)
}

/// Validate `config` and build an [`Etymologist`] over its local sources.
///
/// # Errors
///
/// Returns an error if the config is invalid or a dataset cannot be loaded.
pub fn build_etymologist(config: &EtymonConfig) -> Result<Etymologist> {
    config.validate()?;
    let sources = local_sources(&config.data)?;
    Ok(Etymologist::new(config.lookup.clone(), sources)?)
}
