//! Scan configuration
//!
//! Configuration is an explicit value passed into each pipeline invocation
//! rather than global state, so concurrent scans with different settings are
//! safe.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for one corpus scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Minimum cosine similarity for a connection to be proposed
    pub similarity_threshold: f32,

    /// Maximum proposed edges per document per scan; 0 proposes nothing
    pub connection_limit: usize,

    /// When true, candidates wait in the approval gate instead of being
    /// applied immediately
    pub manual_approval: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
            connection_limit: 5,
            manual_approval: true,
        }
    }
}

impl LinkerConfig {
    /// Validate the configuration before any scan work runs.
    ///
    /// A threshold outside [0, 1] (or NaN) is fatal to the invocation;
    /// `connection_limit` has no upper bound and 0 is a valid "propose
    /// nothing" setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.similarity_threshold.is_finite() {
            return Err(ConfigError::ThresholdNotFinite);
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.similarity_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = LinkerConfig::default();
        assert_eq!(config.similarity_threshold, 0.7);
        assert_eq!(config.connection_limit, 5);
        assert!(config.manual_approval);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let config = LinkerConfig {
            similarity_threshold: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange(1.5))
        );

        let config = LinkerConfig {
            similarity_threshold: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_nan_threshold() {
        let config = LinkerConfig {
            similarity_threshold: f32::NAN,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ThresholdNotFinite));
    }

    #[test]
    fn zero_connection_limit_is_valid() {
        let config = LinkerConfig {
            connection_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: LinkerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LinkerConfig::default());
    }
}
