//! Application layer: use cases driving the conversation and the notebook.
//!
//! Failures crossing this layer follow one policy: they are caught at the
//! boundary nearest their origin and converted to either a silent no-op or
//! a logged-and-swallowed event. Nothing here crashes the session or
//! corrupts the in-memory project.

pub mod conversation_usecase;
pub mod notebook_usecase;

pub use conversation_usecase::{ConversationUseCase, CycleState, SendOutcome};
pub use notebook_usecase::NotebookUseCase;
