use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default safety cap on the number of matched artifacts.
pub const DEFAULT_MAX_MATCHES: usize = 10_000;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locator: LocatorConfig,
    pub remover: RemoverConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Fallout New Vegas install directory (skips auto-detection)
    pub game_dir: Option<PathBuf>,
    /// Mod Organizer 2 base directory
    pub mo2_dir: Option<PathBuf>,
    /// Vortex mods/staging directory
    pub vortex_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoverConfig {
    /// Base directory for the timestamped backup folder (default: cwd)
    pub backup_dir: Option<PathBuf>,
    /// Delete permanently instead of moving into the backup folder
    pub permanent: bool,
    /// Stop scanning after this many matches
    pub max_matches: usize,
}

impl Default for RemoverConfig {
    fn default() -> Self {
        Self {
            backup_dir: None,
            permanent: false,
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the per-user
    /// config file is used when present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// `<config_dir>/nvmp-remover/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("nvmp-remover").join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.remover.max_matches == 0 {
            return Err(ConfigError::Invalid(
                "remover.max_matches must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.remover.max_matches, DEFAULT_MAX_MATCHES);
        assert!(!config.remover.permanent);
        assert!(config.locator.game_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[remover]"));
        assert!(toml_str.contains("max_matches = 10000"));
    }

    #[test]
    fn zero_cap_is_rejected() {
        let mut config = Config::default();
        config.remover.max_matches = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_explicit_file_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/nvmp-remover.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
