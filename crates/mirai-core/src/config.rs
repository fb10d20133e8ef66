//! Application configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Model used when the configuration does not specify one.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// User-editable configuration, read from `config.toml` in the app config
/// directory. Every field has a default so the file is optional.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Gemini model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Override for the directory holding the project document.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Loads configuration from the given path.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is
    /// an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("model = \"gemini-2.5-flash\"").unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.data_dir.is_none());

        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
