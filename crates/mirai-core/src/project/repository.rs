//! Project repository trait.
//!
//! Defines the interface for project persistence operations.

use super::model::Project;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract single-document store for the research project.
///
/// This trait decouples the application's core logic from the specific
/// storage mechanism. Only one project is ever resident; this is a
/// single-document store, not a keyed collection.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Loads the stored project.
    ///
    /// Returns `None` when nothing is stored, and also when the stored
    /// document cannot be deserialized (corrupt or incompatible shape).
    /// A failed load is logged, never surfaced to the caller; the caller
    /// falls back to a default project.
    async fn load(&self) -> Option<Project>;

    /// Serializes and writes the full project.
    ///
    /// Called after every accepted state transition; no diffing, no
    /// debouncing. A failure is reported but non-fatal to the session:
    /// the in-memory state remains authoritative.
    async fn save(&self, project: &Project) -> Result<()>;

    /// Removes the stored document entirely (used by reset).
    async fn clear(&self) -> Result<()>;
}
