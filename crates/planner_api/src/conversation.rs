use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::domain::{ConversationTurn, StudentProfile};

use crate::session::SessionState;

pub const PLACEHOLDER_REPLY: &str = "Response from AI";

/// Produces the assistant side of an exchange.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, profile: &StudentProfile, message: &str) -> String;
}

/// Answers every message with [`PLACEHOLDER_REPLY`] and never calls a model.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderResponder;

#[async_trait]
impl Responder for PlaceholderResponder {
    async fn respond(&self, _profile: &StudentProfile, _message: &str) -> String {
        PLACEHOLDER_REPLY.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// Empty input; nothing was appended.
    Ignored,
}

pub fn should_send(text: &str) -> bool {
    !text.is_empty()
}

/// Appends the user turn and the reply, then flips the input reset toggle.
pub fn record_exchange(
    mut state: SessionState,
    text: &str,
    reply: String,
    now: DateTime<Utc>,
) -> (SessionState, SendOutcome) {
    if !should_send(text) {
        return (state, SendOutcome::Ignored);
    }
    state.conversation.push(ConversationTurn::user(text, now));
    state.conversation.push(ConversationTurn::assistant(reply, now));
    state.reset_text_input = !state.reset_text_input;
    (state, SendOutcome::Sent)
}

#[cfg(test)]
#[path = "tests/conversation_tests.rs"]
mod tests;
