//! Runtime settings shared by the collections
//!
//! Built from a [`CollectionsConfig`] or loaded straight from `kindset.toml`.

use kindset_config::{CollectionsConfig, ConfigLoader, ConfigResult};
use std::path::Path;

/// Tunables applied to a collection when it is created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Capacity reserved up front
    pub initial_capacity: usize,
    /// Fixed seed for `Set::make_sub_set`; OS entropy when `None`
    pub sample_seed: Option<u64>,
    /// Maximum number of elements rendered by `Display`
    pub display_limit: Option<usize>,
}

impl Settings {
    /// Load settings from the nearest kindset.toml above `dir`, with
    /// KINDSET_* environment overrides applied
    pub fn load_from_directory(dir: &Path) -> ConfigResult<Self> {
        let loaded = ConfigLoader::new().load_from_directory(dir)?;
        Ok(Settings::from(&loaded.config))
    }

    pub fn with_sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = Some(limit);
        self
    }
}

impl From<&CollectionsConfig> for Settings {
    fn from(config: &CollectionsConfig) -> Self {
        Settings {
            initial_capacity: config.initial_capacity(),
            sample_seed: config.sample_seed(),
            display_limit: config.display_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config =
            CollectionsConfig::from_toml_str("[capacity]\ninitial = 4\n[sampling]\nseed = 9\n")
                .unwrap();
        let settings = Settings::from(&config);
        assert_eq!(settings.initial_capacity, 4);
        assert_eq!(settings.sample_seed, Some(9));
        assert_eq!(settings.display_limit, None);
    }

    #[test]
    fn test_default_settings() {
        assert_eq!(Settings::from(&CollectionsConfig::default()), Settings::default());
    }
}
