//! Notebook use case.
//!
//! Create/delete operations for research notes and the confirmed project
//! reset. Each accepted transition is persisted immediately; rejected ones
//! touch neither the store nor storage.

use mirai_core::project::{Note, Project, ProjectRepository, ProjectStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Use case for the research notebook and project lifecycle.
pub struct NotebookUseCase {
    store: Arc<RwLock<ProjectStore>>,
    repository: Arc<dyn ProjectRepository>,
}

impl NotebookUseCase {
    /// Creates a new `NotebookUseCase`.
    pub fn new(store: Arc<RwLock<ProjectStore>>, repository: Arc<dyn ProjectRepository>) -> Self {
        Self { store, repository }
    }

    /// Adds a note to the top of the notebook.
    ///
    /// Returns whether the note was accepted. Empty title or content
    /// (after trimming) is a silent no-op.
    pub async fn add_note(&self, title: &str, content: &str) -> bool {
        let snapshot = {
            let mut store = self.store.write().await;
            if !store.add_note(title, content) {
                return false;
            }
            store.snapshot()
        };
        self.persist(&snapshot).await;
        true
    }

    /// Deletes the note with the given id.
    ///
    /// Returns whether a note was removed; a miss is a no-op, not an error.
    pub async fn delete_note(&self, id: &str) -> bool {
        let snapshot = {
            let mut store = self.store.write().await;
            if !store.delete_note(id) {
                return false;
            }
            store.snapshot()
        };
        self.persist(&snapshot).await;
        true
    }

    /// The notes, newest first.
    pub async fn notes(&self) -> Vec<Note> {
        self.store.read().await.project().notes.clone()
    }

    /// Discards the project and starts over with the default record.
    ///
    /// The storage entry is removed; the fresh project is persisted again
    /// on its next mutation. The caller is responsible for asking the user
    /// to confirm first.
    pub async fn reset(&self) -> Project {
        let snapshot = {
            let mut store = self.store.write().await;
            store.reset();
            store.snapshot()
        };
        if let Err(err) = self.repository.clear().await {
            tracing::warn!("Failed to clear stored project: {}", err);
        }
        snapshot
    }

    async fn persist(&self, project: &Project) {
        if let Err(err) = self.repository.save(project).await {
            tracing::warn!("Failed to persist project: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mirai_core::error::Result;
    use std::sync::Mutex;

    struct MockRepository {
        stored: Mutex<Option<Project>>,
    }

    impl MockRepository {
        fn new() -> Self {
            Self {
                stored: Mutex::new(None),
            }
        }

        fn stored(&self) -> Option<Project> {
            self.stored.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProjectRepository for MockRepository {
        async fn load(&self) -> Option<Project> {
            self.stored()
        }

        async fn save(&self, project: &Project) -> Result<()> {
            *self.stored.lock().unwrap() = Some(project.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.stored.lock().unwrap() = None;
            Ok(())
        }
    }

    fn notebook() -> (NotebookUseCase, Arc<MockRepository>) {
        let repository = Arc::new(MockRepository::new());
        let store = Arc::new(RwLock::new(ProjectStore::new(Project::initial())));
        (NotebookUseCase::new(store, repository.clone()), repository)
    }

    #[tokio::test]
    async fn test_add_note_persists() {
        let (notebook, repository) = notebook();

        assert!(notebook.add_note("つの", "おすだけにある").await);

        let notes = notebook.notes().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "つの");
        assert_eq!(repository.stored().unwrap().notes.len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_note_is_not_persisted() {
        let (notebook, repository) = notebook();

        assert!(!notebook.add_note("", "おすだけにある").await);
        assert!(!notebook.add_note("つの", "   ").await);

        assert!(notebook.notes().await.is_empty());
        assert!(repository.stored().is_none());
    }

    #[tokio::test]
    async fn test_delete_note_by_id() {
        let (notebook, repository) = notebook();
        notebook.add_note("a", "1").await;
        notebook.add_note("b", "2").await;

        let id = notebook.notes().await[1].id.clone();
        assert!(notebook.delete_note(&id).await);
        assert!(!notebook.delete_note(&id).await);

        let notes = notebook.notes().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "b");
        assert_eq!(repository.stored().unwrap().notes.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_storage_and_reseeds() {
        let (notebook, repository) = notebook();
        notebook.add_note("a", "1").await;

        let project = notebook.reset().await;

        assert_eq!(project.chat_history.len(), 1);
        assert!(project.notes.is_empty());
        assert!(notebook.notes().await.is_empty());
        assert!(repository.stored().is_none());
    }
}
