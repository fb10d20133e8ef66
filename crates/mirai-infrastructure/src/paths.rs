//! Unified path management for mirai configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mirai/             # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/mirai/        # Data directory
//! └── project.json             # The single persisted project document
//! ```

use mirai_core::error::{MiraiError, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "mirai";

/// Unified path management for mirai.
pub struct MiraiPaths;

impl MiraiPaths {
    /// Returns the mirai configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be
    /// determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| MiraiError::config("Cannot find config directory"))
    }

    /// Returns the mirai data directory, which holds the project document.
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| MiraiError::config("Cannot find data directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
