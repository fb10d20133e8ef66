//! JSON file-based `ProjectRepository` implementation.
//!
//! The whole project lives in one `project.json` document under the data
//! directory. There is no versioning or migration scheme: a document whose
//! shape no longer matches is treated the same as a missing one.

use async_trait::async_trait;
use mirai_core::error::Result;
use mirai_core::project::{Project, ProjectRepository};
use std::path::{Path, PathBuf};
use tokio::fs;

const PROJECT_FILE_NAME: &str = "project.json";

/// Single-document project store on the local filesystem.
pub struct JsonProjectRepository {
    file_path: PathBuf,
}

impl JsonProjectRepository {
    /// Creates a repository rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self {
            file_path: base_dir.join(PROJECT_FILE_NAME),
        })
    }

    /// Creates a repository at the default platform data directory.
    pub fn default_location() -> Result<Self> {
        Self::new(crate::paths::MiraiPaths::data_dir()?)
    }

    /// The path of the stored document.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl ProjectRepository for JsonProjectRepository {
    async fn load(&self) -> Option<Project> {
        let json = match fs::read_to_string(&self.file_path).await {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!("Failed to read project file {:?}: {}", self.file_path, err);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(project) => Some(project),
            Err(err) => {
                tracing::warn!(
                    "Stored project at {:?} could not be deserialized, falling back to a fresh one: {}",
                    self.file_path,
                    err
                );
                None
            }
        }
    }

    async fn save(&self, project: &Project) -> Result<()> {
        let json = serde_json::to_string_pretty(project)?;
        fs::write(&self.file_path, json).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.file_path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
