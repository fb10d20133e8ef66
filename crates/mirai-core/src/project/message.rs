//! Chat transcript message types.
//!
//! This module contains types for representing one turn in the chat
//! transcript, including roles and grounding citations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the author of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the child.
    User,
    /// Message from the assistant persona.
    Assistant,
}

/// A reference returned by the model gateway to ground an assistant reply
/// in external sources.
///
/// Stored externally tagged, e.g. `{"web": {"uri": "...", "title": "..."}}`.
/// Citation kinds the provider may add in the future are dropped at the
/// gateway boundary, so this enum stays closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Citation {
    /// A web page reference.
    Web {
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// A Google Maps place reference.
    MapsPlace {
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

impl Citation {
    /// The URI of the referenced source.
    pub fn uri(&self) -> &str {
        match self {
            Self::Web { uri, .. } | Self::MapsPlace { uri, .. } => uri,
        }
    }

    /// The display title of the referenced source, if the provider sent one.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Web { title, .. } | Self::MapsPlace { title, .. } => title.as_deref(),
        }
    }
}

/// A single message in the chat transcript.
///
/// Content is kept verbatim, literal newlines included. Only assistant
/// messages carry a `sources` list; for user messages the field is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier (UUID format).
    pub id: String,
    /// The role of the message author.
    pub role: MessageRole,
    /// The message text, preserved verbatim.
    pub content: String,
    /// Timestamp when the message was created.
    pub timestamp: DateTime<Utc>,
    /// Grounding citations attached to an assistant reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Citation>>,
}

impl Message {
    /// Creates a user message with a fresh identifier.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            sources: None,
        }
    }

    /// Creates an assistant message without citations (canned greetings).
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            sources: None,
        }
    }

    /// Creates an assistant message carrying the gateway's citation list.
    ///
    /// The list may be empty; it is still recorded so the transcript shows
    /// the reply was grounded.
    pub fn assistant_with_sources(content: impl Into<String>, sources: Vec<Citation>) -> Self {
        Self {
            sources: Some(sources),
            ..Self::assistant(content)
        }
    }
}
