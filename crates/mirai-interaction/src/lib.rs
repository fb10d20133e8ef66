//! Interaction layer: the hosted language model behind the conversation.
//!
//! `mirai-core` defines the [`mirai_core::gateway::ModelGateway`] boundary;
//! this crate provides the Gemini REST implementation and the fixed persona
//! policy sent with every request.

pub mod gemini_gateway;
pub mod personas;

pub use gemini_gateway::GeminiGateway;
pub use personas::{MIRAI_PERSONA, Persona};
