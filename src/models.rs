// src/models.rs

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// The fixed set of subjects the backend knows how to tutor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[default]
    Physics,
    Chemistry,
    Mathematics,
    Biology,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::Physics,
        Subject::Chemistry,
        Subject::Mathematics,
        Subject::Biology,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Mathematics => "Mathematics",
            Subject::Biology => "Biology",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }

    /// Maps F1..F4 style one-based indices onto subjects.
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single transcript entry. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    text: String,
    timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
    pub subject: Subject,
}

/// Reply from `POST /chat`. Only `session_id` and `text_response` are required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub text_response: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// Service metadata served from the backend root route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceInfo {
    pub status: String,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub llm_enabled: bool,
    #[serde(default)]
    pub supported_subjects: Vec<String>,
}

impl ServiceInfo {
    pub fn is_online(&self) -> bool {
        self.status.eq_ignore_ascii_case("online")
    }
}

/// Logs details of each API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subject_serializes_as_plain_name() {
        let request = ChatRequest {
            session_id: None,
            message: "Why is the sky blue?".to_string(),
            subject: Subject::Mathematics,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "session_id": null,
                "message": "Why is the sky blue?",
                "subject": "Mathematics"
            })
        );
    }

    #[test]
    fn test_subject_cycling_wraps() {
        assert_eq!(Subject::Biology.next(), Subject::Physics);
        assert_eq!(Subject::Physics.previous(), Subject::Biology);
        assert_eq!(Subject::Chemistry.next(), Subject::Mathematics);
        assert_eq!(Subject::from_index(3), Some(Subject::Biology));
        assert_eq!(Subject::from_index(4), None);
    }

    #[test]
    fn test_chat_response_tolerates_extra_fields() {
        let response: ChatResponse = serde_json::from_value(json!({
            "session_id": "abc",
            "subject": "Physics",
            "text_response": "F = ma",
            "confidence": 0.9,
            "context_used": [{"role": "user", "text": "hi"}]
        }))
        .unwrap();
        assert_eq!(response.session_id, "abc");
        assert_eq!(response.text_response, "F = ma");
        assert_eq!(response.subject.as_deref(), Some("Physics"));
    }

    #[test]
    fn test_chat_response_requires_text() {
        let parsed = serde_json::from_value::<ChatResponse>(json!({ "session_id": "abc" }));
        assert!(parsed.is_err());
    }
}
