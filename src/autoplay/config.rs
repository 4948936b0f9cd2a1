//! Autoplay configuration, loadable from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::autoplay::StrategyKind;

/// Errors raised while loading an [`AutoplayConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for automated games.
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// max_moves = 5000
/// strategy = "corner"
/// keep_playing = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutoplayConfig {
    /// Stop after this many moves even if the game is not over.
    pub max_moves: u32,
    /// Strategy used to pick moves.
    pub strategy: StrategyKind,
    /// Continue after the first 2048 instead of stopping there.
    pub keep_playing: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            max_moves: 100_000,
            strategy: StrategyKind::default(),
            keep_playing: true,
        }
    }
}

impl AutoplayConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML or has
    /// unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AutoplayConfig::default();
        assert_eq!(config.max_moves, 100_000);
        assert_eq!(config.strategy, StrategyKind::Greedy);
        assert!(config.keep_playing);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AutoplayConfig::from_toml_str("strategy = \"random\"").unwrap();
        assert_eq!(config.strategy, StrategyKind::Random);
        assert_eq!(config.max_moves, 100_000);
    }

    #[test]
    fn test_full_toml() {
        let text = "max_moves = 250\nstrategy = \"corner\"\nkeep_playing = false\n";
        let config = AutoplayConfig::from_toml_str(text).unwrap();
        assert_eq!(
            config,
            AutoplayConfig {
                max_moves: 250,
                strategy: StrategyKind::Corner,
                keep_playing: false,
            }
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = AutoplayConfig::from_toml_str("speed = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AutoplayConfig::from_toml_file(Path::new("/nonexistent/grid2048.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
