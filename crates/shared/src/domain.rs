use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quarter {
    #[default]
    Fall,
    Winter,
    Spring,
}

/// Year of study, always within `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AcademicYear(u8);

impl AcademicYear {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 4;

    pub fn new(year: u8) -> Result<Self, InvalidAcademicYear> {
        if (Self::FIRST..=Self::LAST).contains(&year) {
            Ok(Self(year))
        } else {
            Err(InvalidAcademicYear(year.into()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for AcademicYear {
    fn default() -> Self {
        Self(Self::FIRST)
    }
}

impl TryFrom<u8> for AcademicYear {
    type Error = InvalidAcademicYear;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for AcademicYear {
    type Error = InvalidAcademicYear;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| InvalidAcademicYear(value))
            .and_then(Self::new)
    }
}

impl From<AcademicYear> for u8 {
    fn from(value: AcademicYear) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("academic year must be between 1 and 4, got {0}")]
pub struct InvalidAcademicYear(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Prefix used when a turn is flattened into a display line.
    pub fn prefix(self) -> &'static str {
        match self {
            Role::User => "You: ",
            Role::Assistant => "AI: ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            sent_at,
        }
    }

    pub fn assistant(text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            sent_at,
        }
    }
}

impl fmt::Display for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.role.prefix(), self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptUpload {
    pub filename: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub school: String,
    pub major: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    pub academic_year: AcademicYear,
    pub quarter: Quarter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<TranscriptUpload>,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
