use shared::protocol::FeedbackAck;
use tracing::info;

pub const FEEDBACK_ACKNOWLEDGMENT: &str = "Thank you for your feedback!";

/// Drops the text and returns the fixed acknowledgment.
pub fn submit_feedback(text: &str) -> FeedbackAck {
    info!(chars = text.chars().count(), "feedback received and discarded");
    FeedbackAck {
        message: FEEDBACK_ACKNOWLEDGMENT.to_string(),
    }
}
