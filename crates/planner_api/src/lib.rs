pub mod catalog;
pub mod conversation;
pub mod feedback;
pub mod form;
pub mod session;
pub mod transcript;

use std::sync::Arc;

use chrono::Utc;
use shared::{
    domain::SessionId,
    error::{ApiError, ErrorCode},
    protocol::{FeedbackAck, MajorsResponse, ProfileUpdate, SessionView, SpecializationsResponse},
};
use tracing::info;

use catalog::Catalog;
use conversation::{record_exchange, should_send, PlaceholderResponder, Responder, SendOutcome};
use session::{SessionState, SessionStore};
use transcript::IncomingTranscript;

pub const DEFAULT_MAX_TRANSCRIPT_BYTES: u64 = 200 * 1024 * 1024;

#[derive(Clone)]
pub struct ApiContext {
    pub catalog: Catalog,
    pub sessions: SessionStore,
    pub responder: Arc<dyn Responder>,
    pub max_transcript_bytes: u64,
}

impl ApiContext {
    pub fn new(catalog: Catalog, responder: Arc<dyn Responder>, max_transcript_bytes: u64) -> Self {
        Self {
            catalog,
            sessions: SessionStore::new(),
            responder,
            max_transcript_bytes,
        }
    }
}

impl Default for ApiContext {
    fn default() -> Self {
        Self::new(
            Catalog::ucr(),
            Arc::new(PlaceholderResponder),
            DEFAULT_MAX_TRANSCRIPT_BYTES,
        )
    }
}

pub fn list_schools(ctx: &ApiContext) -> Vec<String> {
    ctx.catalog
        .schools()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn list_majors(ctx: &ApiContext, school: &str) -> Result<MajorsResponse, ApiError> {
    let majors = ctx
        .catalog
        .majors_for(school)
        .ok_or_else(|| ApiError::not_found(format!("school '{school}' not found")))?;
    Ok(MajorsResponse {
        school: school.to_string(),
        majors: majors.into_iter().map(str::to_string).collect(),
    })
}

pub fn list_specializations(
    ctx: &ApiContext,
    school: &str,
    major: &str,
) -> Result<SpecializationsResponse, ApiError> {
    let specializations = ctx
        .catalog
        .specializations_for(school, major)
        .ok_or_else(|| {
            ApiError::not_found(format!("major '{major}' not found in '{school}'"))
        })?;
    Ok(SpecializationsResponse {
        school: school.to_string(),
        major: major.to_string(),
        specializations: specializations.iter().map(|s| s.to_string()).collect(),
    })
}

pub async fn create_session(ctx: &ApiContext) -> Result<SessionView, ApiError> {
    let state = SessionState::new(&ctx.catalog).map_err(internal)?;
    let session_id = ctx.sessions.insert(state.clone()).await;
    let active_sessions = ctx.sessions.len().await;
    info!(%session_id, active_sessions, "session started");
    Ok(state.view(session_id))
}

pub async fn get_session(ctx: &ApiContext, session_id: SessionId) -> Result<SessionView, ApiError> {
    let state = ctx.sessions.get(session_id).await?;
    Ok(state.view(session_id))
}

pub async fn end_session(ctx: &ApiContext, session_id: SessionId) -> Result<(), ApiError> {
    ctx.sessions.remove(session_id).await?;
    let active_sessions = ctx.sessions.len().await;
    info!(%session_id, active_sessions, "session ended");
    Ok(())
}

pub async fn update_profile(
    ctx: &ApiContext,
    session_id: SessionId,
    update: ProfileUpdate,
) -> Result<SessionView, ApiError> {
    let catalog = ctx.catalog;
    let state = ctx
        .sessions
        .update(session_id, |mut state| {
            state.profile = form::apply_update(&catalog, state.profile, update)?;
            Ok(state)
        })
        .await?;
    Ok(state.view(session_id))
}

pub async fn upload_transcript(
    ctx: &ApiContext,
    session_id: SessionId,
    incoming: IncomingTranscript,
) -> Result<SessionView, ApiError> {
    let max_bytes = ctx.max_transcript_bytes;
    let state = ctx
        .sessions
        .update(session_id, |state| {
            transcript::accept_transcript(state, incoming, max_bytes, Utc::now())
        })
        .await?;
    if let Some(upload) = &state.profile.transcript {
        info!(%session_id, size_bytes = upload.size_bytes, "transcript accepted");
    }
    Ok(state.view(session_id))
}

pub async fn send_chat_message(
    ctx: &ApiContext,
    session_id: SessionId,
    text: &str,
) -> Result<SessionView, ApiError> {
    let snapshot = ctx.sessions.get(session_id).await?;
    if !should_send(text) {
        return Ok(snapshot.view(session_id));
    }

    // The responder may suspend, so it runs outside the session lock.
    let reply = ctx.responder.respond(&snapshot.profile, text).await;
    let mut outcome = SendOutcome::Ignored;
    let state = ctx
        .sessions
        .update(session_id, |state| {
            let (next, sent) = record_exchange(state, text, reply, Utc::now());
            outcome = sent;
            Ok(next)
        })
        .await?;
    info!(%session_id, ?outcome, turns = state.conversation.len(), "chat message handled");
    Ok(state.view(session_id))
}

pub async fn submit_feedback(
    ctx: &ApiContext,
    session_id: SessionId,
    text: &str,
) -> Result<FeedbackAck, ApiError> {
    ctx.sessions.get(session_id).await?;
    Ok(feedback::submit_feedback(text))
}

fn internal(err: impl std::fmt::Display) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
