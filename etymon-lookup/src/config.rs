//! Lookup configuration with sensible defaults.
//!
//! [`LookupConfig`] controls per-source timeouts, result caching, circuit
//! breaking and optional root-era estimation.

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Configuration for etymology lookups.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Per-source fetch timeout in seconds.
    pub timeout_seconds: u64,
    /// How long to cache finalised records in seconds. Set to 0 to disable caching.
    pub cache_ttl_seconds: u64,
    /// Maximum number of cached records.
    pub cache_capacity: u64,
    /// Fill unset root years with a typical attestation year for the root language.
    pub estimate_root_years: bool,
    /// Consecutive failures before a source is temporarily skipped.
    pub failure_threshold: u32,
    /// Seconds a tripped source is skipped before a probe is allowed.
    pub cooldown_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            cache_ttl_seconds: 600,
            cache_capacity: 1_000,
            estimate_root_years: false,
            failure_threshold: 3,
            cooldown_secs: 60,
        }
    }
}

impl LookupConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `failure_threshold` must be greater than 0
    /// - `cache_capacity` must be greater than 0 when caching is enabled
    pub fn validate(&self) -> Result<(), LookupError> {
        if self.timeout_seconds == 0 {
            return Err(LookupError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.failure_threshold == 0 {
            return Err(LookupError::Config(
                "failure_threshold must be greater than 0".into(),
            ));
        }
        if self.cache_ttl_seconds > 0 && self.cache_capacity == 0 {
            return Err(LookupError::Config(
                "cache_capacity must be greater than 0 when caching is enabled".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = LookupConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.cache_ttl_seconds, 600);
        assert_eq!(config.cache_capacity, 1_000);
        assert!(!config.estimate_root_years);
        assert_eq!(config.failure_threshold, 3);
        assert_eq!(config.cooldown_secs, 60);
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(LookupConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = LookupConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_failure_threshold_rejected() {
        let config = LookupConfig {
            failure_threshold: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("failure_threshold"));
    }

    #[test]
    fn zero_capacity_rejected_only_when_caching() {
        let caching = LookupConfig {
            cache_capacity: 0,
            ..Default::default()
        };
        assert!(caching.validate().is_err());

        let uncached = LookupConfig {
            cache_capacity: 0,
            cache_ttl_seconds: 0,
            ..Default::default()
        };
        assert!(uncached.validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: LookupConfig =
            serde_json::from_str(r#"{"estimate_root_years":true}"#).expect("deserialize");
        assert!(config.estimate_root_years);
        assert_eq!(config.timeout_seconds, 10);
    }
}
