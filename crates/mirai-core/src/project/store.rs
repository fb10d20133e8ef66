//! Pure transition operations over the project value, and the store that
//! owns the canonical in-memory project.
//!
//! Each transition takes the current project and returns a new one; the
//! input is never mutated. Persistence is the caller's responsibility and
//! happens after each accepted transition.

use super::message::Message;
use super::model::Project;
use super::note::Note;

/// Pushes a message to the end of the chat history.
///
/// No deduplication is performed; the caller guarantees identifier
/// uniqueness.
pub fn append_message(project: &Project, message: Message) -> Project {
    let mut next = project.clone();
    next.chat_history.push(message);
    next
}

/// Prepends a freshly built note to the notes list (newest first).
///
/// Empty title or content (after trimming whitespace) is rejected and the
/// project is returned unchanged.
pub fn add_note(project: &Project, title: &str, content: &str) -> Project {
    match Note::new(title, content) {
        Some(note) => {
            let mut next = project.clone();
            next.notes.insert(0, note);
            next
        }
        None => project.clone(),
    }
}

/// Removes the note with the given identifier, preserving the relative
/// order of the rest. A miss is a no-op, not an error.
pub fn delete_note(project: &Project, id: &str) -> Project {
    let mut next = project.clone();
    next.notes.retain(|note| note.id != id);
    next
}

/// The default project, seeded with a single assistant greeting message.
pub fn reset() -> Project {
    Project::reset()
}

/// Owns the canonical in-memory project and applies the pure transitions.
///
/// The store never persists by itself. Each mutating method reports whether
/// the transition was accepted so the caller can persist exactly after each
/// accepted transition, rather than on every render or call.
#[derive(Debug)]
pub struct ProjectStore {
    project: Project,
}

impl ProjectStore {
    /// Creates a store around an already-loaded project.
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    /// The current project.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// An owned copy of the current project, for persistence.
    pub fn snapshot(&self) -> Project {
        self.project.clone()
    }

    /// Appends a message to the chat history. Always accepted.
    pub fn append_message(&mut self, message: Message) {
        self.project = append_message(&self.project, message);
    }

    /// Adds a note; returns whether the note was accepted.
    pub fn add_note(&mut self, title: &str, content: &str) -> bool {
        let next = add_note(&self.project, title, content);
        let accepted = next.notes.len() != self.project.notes.len();
        self.project = next;
        accepted
    }

    /// Deletes a note by id; returns whether a note was removed.
    pub fn delete_note(&mut self, id: &str) -> bool {
        let next = delete_note(&self.project, id);
        let removed = next.notes.len() != self.project.notes.len();
        self.project = next;
        removed
    }

    /// Replaces the project with the default record.
    pub fn reset(&mut self) {
        self.project = reset();
    }
}
