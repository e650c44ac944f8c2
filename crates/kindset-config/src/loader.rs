//! Configuration Loader
//!
//! Finds `kindset.toml` and applies environment overrides on top of it.

use crate::collections::CollectionsConfig;
use crate::{ConfigError, ConfigResult};
use std::env::{self, VarError};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "kindset.toml";

/// Configuration loader
///
/// Sources, lowest priority first:
/// 1. Global config (~/.kindset/config.toml) - only when no project file is found
/// 2. Project config (kindset.toml) - found by walking up from the start directory
/// 3. Environment variables (KINDSET_*)
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Loaded configuration and where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Effective configuration
    pub config: CollectionsConfig,

    /// File the configuration was read from, if any
    pub source: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use an explicit global config path instead of ~/.kindset/config.toml
    pub fn with_global_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// # Errors
    /// `IoError` if `start_dir` does not exist.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<LoadedConfig> {
        let (source, config) = match Self::find_project_config(start_dir)? {
            Some((path, config)) => (Some(path), config),
            None => self.load_global_config()?,
        };

        let config = Self::apply_env_overrides(config)?;
        Ok(LoadedConfig { config, source })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<LoadedConfig> {
        let config = CollectionsConfig::load_from_file(config_path)?;
        let config = Self::apply_env_overrides(config)?;

        Ok(LoadedConfig {
            config,
            source: Some(config_path.to_path_buf()),
        })
    }

    /// Walk up the directory tree looking for kindset.toml
    ///
    /// Relative start directories are resolved first so that the walk reaches
    /// the real parents of `.` and `..`.
    fn find_project_config(start_dir: &Path) -> ConfigResult<Option<(PathBuf, CollectionsConfig)>> {
        let mut current = start_dir.canonicalize()?;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let config = CollectionsConfig::load_from_file(&config_path)?;
                return Ok(Some((config_path, config)));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok(None),
            }
        }
    }

    /// Load the global configuration, if it exists
    fn load_global_config(&mut self) -> ConfigResult<(Option<PathBuf>, CollectionsConfig)> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => {
                let path = Self::global_config_path()?;
                self.global_config_path = Some(path.clone());
                path
            }
        };

        if !path.exists() {
            return Ok((None, CollectionsConfig::default()));
        }

        let config = CollectionsConfig::load_from_file(&path)?;
        Ok((Some(path), config))
    }

    /// Apply environment variable overrides
    ///
    /// Recognised variables: KINDSET_INITIAL_CAPACITY, KINDSET_SAMPLE_SEED,
    /// KINDSET_DISPLAY_LIMIT.
    fn apply_env_overrides(config: CollectionsConfig) -> ConfigResult<CollectionsConfig> {
        let mut overrides = CollectionsConfig::default();

        if let Some(initial) = env_value::<usize>("KINDSET_INITIAL_CAPACITY")? {
            overrides.capacity.get_or_insert_with(Default::default).initial = Some(initial);
        }
        if let Some(seed) = env_value::<u64>("KINDSET_SAMPLE_SEED")? {
            overrides.sampling.get_or_insert_with(Default::default).seed = Some(seed);
        }
        if let Some(limit) = env_value::<usize>("KINDSET_DISPLAY_LIMIT")? {
            overrides.display.get_or_insert_with(Default::default).limit = Some(limit);
        }

        let mut config = config;
        config.merge(&overrides);
        config.validate()?;
        Ok(config)
    }

    /// Get the global configuration file path (~/.kindset/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".kindset").join("config.toml"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn env_value<T: FromStr>(name: &str) -> ConfigResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: name.to_string(),
                reason: format!("cannot parse '{}'", raw),
            }),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            field: name.to_string(),
            reason: format!("not valid unicode: {:?}", raw),
        }),
    }
}
