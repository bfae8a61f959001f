use serde::{Deserialize, Serialize};

use crate::domain::{ConversationTurn, Quarter, SessionId, StudentProfile};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorsResponse {
    pub school: String,
    pub majors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationsResponse {
    pub school: String,
    pub major: String,
    pub specializations: Vec<String>,
}

/// Everything a front end needs to render one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub profile: StudentProfile,
    pub conversation: Vec<ConversationTurn>,
    pub lines: Vec<String>,
    pub input_key: String,
}

/// Partial profile edit. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub academic_year: Option<i64>,
    #[serde(default)]
    pub quarter: Option<Quarter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackAck {
    pub message: String,
}
