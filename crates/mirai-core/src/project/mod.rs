//! Project domain module.
//!
//! This module contains the project aggregate, its message and note types,
//! the pure-transition store, and the repository interface.
//!
//! # Module Structure
//!
//! - `model`: Root aggregate (`Project`)
//! - `message`: Transcript types (`Message`, `MessageRole`, `Citation`)
//! - `note`: Research note type (`Note`)
//! - `store`: Pure transitions and the owning store (`ProjectStore`)
//! - `repository`: Repository trait for project persistence

mod message;
mod model;
mod note;
mod repository;
pub mod store;

// Re-export public API
pub use message::{Citation, Message, MessageRole};
pub use model::{DEFAULT_PROJECT_ID, INITIAL_GREETING, Project, RESET_GREETING};
pub use note::Note;
pub use repository::ProjectRepository;
pub use store::ProjectStore;
