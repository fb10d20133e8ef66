//! Model gateway boundary.
//!
//! The hosted language model is an external collaborator invoked once per
//! conversation cycle. Core only knows this trait; the concrete REST client
//! lives in `mirai-interaction`.

use crate::error::Result;
use crate::project::{Citation, Message, MessageRole};
use async_trait::async_trait;

/// One prior turn of the transcript, reduced to role and text.
///
/// Citations are not resent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: MessageRole,
    pub text: String,
}

impl From<&Message> for Turn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            text: message.content.clone(),
        }
    }
}

/// Reply returned by the hosted language model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatewayReply {
    /// Response text; may be empty.
    pub text: String,
    /// Grounding citations; may be empty.
    pub citations: Vec<Citation>,
}

/// A request/response call to the hosted language model.
///
/// Any transport or provider-side error surfaces as a single
/// [`crate::MiraiError::Gateway`] failure with no finer-grained taxonomy.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends the prior transcript plus one new user turn and returns the
    /// model's reply.
    async fn send(&self, history: &[Turn], input: &str) -> Result<GatewayReply>;
}
