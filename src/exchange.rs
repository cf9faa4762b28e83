//! Conversation state and the single-flight exchange with the backend.

use crate::api::AtomiaClient;
use crate::constants::FALLBACK_REPLY;
use crate::errors::AtomiaResult;
use crate::models::{ChatRequest, ChatResponse, Message, Role, Subject};
use crate::transcript::Transcript;

/// Owns everything the conversation view renders: pending input, transcript,
/// session, subject and the busy flag.
#[derive(Debug, Default)]
pub struct Conversation {
    input: String,
    transcript: Transcript,
    session_id: Option<String>,
    subject: Subject,
    busy: bool,
}

impl Conversation {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn select_subject(&mut self, subject: Subject) {
        if subject != self.subject {
            log::debug!("subject changed {} -> {}", self.subject, subject);
        }
        self.subject = subject;
    }

    pub fn next_subject(&mut self) {
        self.select_subject(self.subject.next());
    }

    pub fn previous_subject(&mut self) {
        self.select_subject(self.subject.previous());
    }

    /// Puts the last thing the user sent back into an empty input box.
    pub fn recall_last_message(&mut self) -> bool {
        if !self.input.is_empty() {
            return false;
        }
        match self.transcript.last_from(Role::User) {
            Some(message) => {
                self.input = message.text().to_string();
                true
            }
            None => false,
        }
    }

    /// Starts an exchange: records the user turn, clears input, marks busy and
    /// returns the request to send. Returns `None` for blank input or while
    /// another exchange is still in flight.
    pub fn begin_exchange(&mut self) -> Option<ChatRequest> {
        if self.busy {
            log::debug!("submit ignored, exchange already in flight");
            return None;
        }
        if self.input.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.transcript.append(Message::user(text.clone()));
        self.busy = true;

        Some(ChatRequest {
            session_id: self.session_id.clone(),
            message: text,
            subject: self.subject,
        })
    }

    /// Finishes the in-flight exchange with the backend's outcome.
    pub fn complete_exchange(&mut self, result: AtomiaResult<ChatResponse>) {
        match result {
            Ok(reply) => {
                if self.session_id.as_deref() != Some(reply.session_id.as_str()) {
                    log::info!("session is now {}", reply.session_id);
                }
                self.session_id = Some(reply.session_id);
                self.transcript.append(Message::assistant(reply.text_response));
            }
            Err(e) => {
                log::error!("exchange failed: {}", e);
                self.transcript.append(Message::assistant(FALLBACK_REPLY));
            }
        }
        self.busy = false;
    }

    /// Runs a whole exchange inline. Returns whether a request was sent.
    pub async fn submit(&mut self, client: &AtomiaClient) -> bool {
        let Some(request) = self.begin_exchange() else {
            return false;
        };
        let result = client.send_chat(&request).await;
        self.complete_exchange(result);
        true
    }
}
