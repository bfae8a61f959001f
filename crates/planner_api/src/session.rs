use std::{collections::HashMap, sync::Arc};

use shared::{
    domain::{ConversationTurn, SessionId, StudentProfile},
    error::ApiError,
    protocol::SessionView,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    form::initial_profile,
};

/// One user's state between interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub profile: StudentProfile,
    pub conversation: Vec<ConversationTurn>,
    /// Flipped after every send so the chat input is rebuilt empty.
    pub reset_text_input: bool,
}

impl SessionState {
    pub fn new(catalog: &Catalog) -> Result<Self, CatalogError> {
        Ok(Self {
            profile: initial_profile(catalog)?,
            conversation: Vec::new(),
            reset_text_input: false,
        })
    }

    pub fn input_key(&self) -> String {
        format!("user_message_{}", self.reset_text_input)
    }

    pub fn lines(&self) -> Vec<String> {
        self.conversation.iter().map(ToString::to_string).collect()
    }

    pub fn view(&self, session_id: SessionId) -> SessionView {
        SessionView {
            session_id,
            profile: self.profile.clone(),
            conversation: self.conversation.clone(),
            lines: self.lines(),
            input_key: self.input_key(),
        }
    }
}

/// In-memory session table. Clones share the same table.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, state: SessionState) -> SessionId {
        let mut sessions = self.sessions.write().await;
        let mut session_id = SessionId::new();
        while sessions.contains_key(&session_id) {
            session_id = SessionId::new();
        }
        sessions.insert(session_id, state);
        session_id
    }

    pub async fn get(&self, session_id: SessionId) -> Result<SessionState, ApiError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or_else(|| session_not_found(session_id))
    }

    /// Runs one state transition under the write lock. The stored state is
    /// only replaced when `transition` succeeds.
    pub async fn update<F>(
        &self,
        session_id: SessionId,
        transition: F,
    ) -> Result<SessionState, ApiError>
    where
        F: FnOnce(SessionState) -> Result<SessionState, ApiError>,
    {
        let mut sessions = self.sessions.write().await;
        let current = sessions
            .get(&session_id)
            .cloned()
            .ok_or_else(|| session_not_found(session_id))?;
        let next = transition(current)?;
        sessions.insert(session_id, next.clone());
        debug!(%session_id, turns = next.conversation.len(), "session updated");
        Ok(next)
    }

    pub async fn remove(&self, session_id: SessionId) -> Result<(), ApiError> {
        self.sessions
            .write()
            .await
            .remove(&session_id)
            .map(|_| ())
            .ok_or_else(|| session_not_found(session_id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn session_not_found(session_id: SessionId) -> ApiError {
    ApiError::not_found(format!("session {session_id} not found"))
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
