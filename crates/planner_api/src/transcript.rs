use chrono::{DateTime, Utc};
use shared::{
    domain::TranscriptUpload,
    error::{ApiError, ErrorCode},
};

use crate::session::SessionState;

pub const ACCEPTED_EXTENSION: &str = "pdf";
const MAX_FILENAME_BYTES: usize = 180;

/// A received transcript file. Only its size is kept.
#[derive(Debug, Clone)]
pub struct IncomingTranscript {
    pub filename: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
}

pub fn is_pdf(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION))
}

pub fn accept_transcript(
    mut state: SessionState,
    incoming: IncomingTranscript,
    max_bytes: u64,
    now: DateTime<Utc>,
) -> Result<SessionState, ApiError> {
    let filename = incoming.filename.trim();
    if filename.is_empty() {
        return Err(ApiError::validation("transcript filename is required"));
    }
    if filename.len() > MAX_FILENAME_BYTES {
        return Err(ApiError::validation("filename is too long"));
    }
    if filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::validation(
            "filename must not contain path separators",
        ));
    }
    if !is_pdf(filename) {
        return Err(ApiError::validation("transcript must be a .pdf file"));
    }
    if incoming.size_bytes == 0 {
        return Err(ApiError::validation("transcript cannot be empty"));
    }
    if incoming.size_bytes > max_bytes {
        return Err(ApiError::new(
            ErrorCode::PayloadTooLarge,
            format!("transcript exceeds {max_bytes} bytes"),
        ));
    }

    state.profile.transcript = Some(TranscriptUpload {
        filename: filename.to_string(),
        size_bytes: incoming.size_bytes,
        content_type: incoming
            .content_type
            .filter(|mime| !mime.trim().is_empty()),
        uploaded_at: now,
    });
    Ok(state)
}

#[cfg(test)]
#[path = "tests/transcript_tests.rs"]
mod tests;
