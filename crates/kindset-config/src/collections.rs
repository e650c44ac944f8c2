//! Collection Configuration (kindset.toml)
//!
//! Every section and every field is optional; a missing value means "use the
//! built-in default".

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration read from kindset.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct CollectionsConfig {
    /// Pre-allocation settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<CapacityConfig>,

    /// Random sub-set sampling settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling: Option<SamplingConfig>,

    /// Display rendering settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
}

/// Pre-allocation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct CapacityConfig {
    /// Capacity reserved by a new collection (default: 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<usize>,
}

/// Random sub-set sampling settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    /// Fixed RNG seed; OS entropy is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Display rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Maximum number of rendered elements (default: unlimited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl CollectionsConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        Self::parse(&content, path)
    }

    /// Parse configuration from TOML text that did not come from a file
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, origin: &Path) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: PathBuf::from(origin),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(limit) = self.display_limit() {
            if limit == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "display.limit".to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Capacity reserved by new collections
    pub fn initial_capacity(&self) -> usize {
        self.capacity
            .as_ref()
            .and_then(|c| c.initial)
            .unwrap_or(0)
    }

    /// Seed for sub-set sampling, if one is pinned
    pub fn sample_seed(&self) -> Option<u64> {
        self.sampling.as_ref().and_then(|s| s.seed)
    }

    /// Maximum number of elements rendered by `Display`
    pub fn display_limit(&self) -> Option<usize> {
        self.display.as_ref().and_then(|d| d.limit)
    }

    /// Merge another config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &CollectionsConfig) {
        if let Some(initial) = other.capacity.as_ref().and_then(|c| c.initial) {
            self.capacity.get_or_insert_with(Default::default).initial = Some(initial);
        }
        if let Some(seed) = other.sample_seed() {
            self.sampling.get_or_insert_with(Default::default).seed = Some(seed);
        }
        if let Some(limit) = other.display_limit() {
            self.display.get_or_insert_with(Default::default).limit = Some(limit);
        }
    }
}
