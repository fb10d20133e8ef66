//! Research note type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-authored research memo stored independently of the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique note identifier (UUID format).
    pub id: String,
    /// Note title; never empty.
    pub title: String,
    /// Note body; never empty.
    pub content: String,
    /// Timestamp when the note was created.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Builds a note with a fresh identifier and the current timestamp.
    ///
    /// Returns `None` when title or content is empty after trimming
    /// whitespace, so partial notes never come into existence.
    pub fn new(title: &str, content: &str) -> Option<Self> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        })
    }
}
