//! Engine tuning loaded from JSON or taken from defaults.
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SEARCH_DEPTH;
use crate::disruption::MagnitudeTable;
use crate::error::ConfigError;
use crate::graph::{EdgeMutation, PathLimits};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Plies searched when advancing or scoring a replan candidate.
    #[serde(default = "EngineConfig::default_search_depth")]
    pub search_depth: u32,
    #[serde(default)]
    pub path_limits: PathLimits,
    #[serde(default)]
    pub edge_mutation: EdgeMutation,
    #[serde(default)]
    pub magnitudes: MagnitudeTable,
}

impl EngineConfig {
    const fn default_search_depth() -> u32 {
        DEFAULT_SEARCH_DEPTH
    }

    /// Load engine configuration from JSON; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value allows the engine to make progress.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MinViolation`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth < 1 {
            return Err(ConfigError::MinViolation {
                field: "search_depth",
                min: 1,
                value: u64::from(self.search_depth),
            });
        }
        if self.path_limits.max_paths < 1 {
            return Err(ConfigError::MinViolation {
                field: "path_limits.max_paths",
                min: 1,
                value: u64::try_from(self.path_limits.max_paths).unwrap_or(u64::MAX),
            });
        }
        if self.path_limits.max_hops < 1 {
            return Err(ConfigError::MinViolation {
                field: "path_limits.max_hops",
                min: 1,
                value: u64::try_from(self.path_limits.max_hops).unwrap_or(u64::MAX),
            });
        }
        self.magnitudes.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: Self::default_search_depth(),
            path_limits: PathLimits::default(),
            edge_mutation: EdgeMutation::default(),
            magnitudes: MagnitudeTable::default(),
        }
    }
}
