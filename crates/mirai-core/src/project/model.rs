//! Project domain model.
//!
//! This module contains the root aggregate that represents one child's
//! research project: the chat transcript plus the notebook.

use super::message::Message;
use super::note::Note;
use serde::{Deserialize, Serialize};

/// Identifier of the single resident project. There is no multi-tenancy;
/// exactly one project exists per user.
pub const DEFAULT_PROJECT_ID: &str = "default";

/// Greeting shown when the app starts with no saved project.
pub const INITIAL_GREETING: &str =
    "こんにちは！探究パートナーのミライだよ。今日はなにを調べるのかな？いっしょにワクワクする発見をしよう！";

/// Greeting shown after the child confirms a reset.
pub const RESET_GREETING: &str = "こんにちは！また新しく始めよう！今日はどんなことを知りたいかな？";

/// The single persisted aggregate of conversation and notes for a session.
///
/// The in-memory `Project` is the single source of truth; every mutation
/// produces a new value (the input is never mutated in place) and the caller
/// persists the result. Invariants:
///
/// - `chat_history` is oldest-first and append-only.
/// - `notes` is newest-first; deletion preserves the relative order of the
///   remaining notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque project identifier.
    pub id: String,
    /// Free-text research goal; no flow currently edits it.
    pub goal: String,
    /// Reserved for a future guided-question flow; persisted but never read.
    #[serde(default)]
    pub questions: Vec<String>,
    /// Research notes, newest first.
    pub notes: Vec<Note>,
    /// Chat transcript, oldest first.
    pub chat_history: Vec<Message>,
}

impl Project {
    /// A fresh project greeting the child for the first time.
    pub fn initial() -> Self {
        Self::seeded(INITIAL_GREETING)
    }

    /// The default project produced by a confirmed reset.
    pub fn reset() -> Self {
        Self::seeded(RESET_GREETING)
    }

    fn seeded(greeting: &str) -> Self {
        Self {
            id: DEFAULT_PROJECT_ID.to_string(),
            goal: String::new(),
            questions: Vec::new(),
            notes: Vec::new(),
            chat_history: vec![Message::assistant(greeting)],
        }
    }
}
