//! Kindset Configuration
//!
//! Loads the tunables used by kindset collections from `kindset.toml`:
//! - Initial capacity of newly created collections
//! - Seed for random sub-set sampling
//! - Element limit for display rendering
//!
//! # Configuration Hierarchy
//!
//! Later sources override earlier ones:
//! 1. Global config (~/.kindset/config.toml), used only when no project file exists
//! 2. Project config (kindset.toml, searched upwards from a directory)
//! 3. Environment variables (KINDSET_*)
//!
//! # Example
//!
//! ```no_run
//! use kindset_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! ```

pub mod collections;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use collections::{CapacityConfig, CollectionsConfig, DisplayConfig, SamplingConfig};
pub use loader::{ConfigLoader, LoadedConfig, CONFIG_FILE_NAME};
