use crate::errors::AtomiaResult;
use crate::exchange::Conversation;
use crate::models::{ChatRequest, ChatResponse, ServiceInfo, Subject};
use crate::status_indicator::StatusIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

/// What the header knows about the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceStatus {
    Unknown,
    Online(ServiceInfo),
    Offline,
}

pub struct App {
    pub state: AppState,
    pub conversation: Conversation,
    pub service: ServiceStatus,
    pub status_indicator: StatusIndicator,
    pub chat_scroll: u16,
    /// Largest useful scroll offset as of the last draw.
    pub max_scroll: u16,
    pub follow_latest: bool,
}

impl App {
    pub fn new(subject: Subject) -> App {
        App {
            state: AppState::Chat,
            conversation: Conversation::new(subject),
            service: ServiceStatus::Unknown,
            status_indicator: StatusIndicator::new(),
            chat_scroll: 0,
            max_scroll: 0,
            follow_latest: true,
        }
    }

    pub fn scroll_up(&mut self) {
        self.follow_latest = false;
        self.chat_scroll = self.chat_scroll.min(self.max_scroll).saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = (self.chat_scroll + 1).min(self.max_scroll);
        if self.chat_scroll >= self.max_scroll {
            self.follow_latest = true;
        }
    }

    pub fn page_up(&mut self, lines: u16) {
        for _ in 0..lines {
            self.scroll_up();
        }
    }

    pub fn page_down(&mut self, lines: u16) {
        for _ in 0..lines {
            self.scroll_down();
        }
    }

    pub fn scroll_to_latest(&mut self) {
        self.follow_latest = true;
    }

    /// Moves the scroll offset toward the bottom, closing half of the
    /// remaining distance per frame. Called from the draw pass.
    pub fn step_scroll(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        if self.chat_scroll > max_scroll {
            self.chat_scroll = max_scroll;
        }
        if self.follow_latest && self.chat_scroll < max_scroll {
            let remaining = max_scroll - self.chat_scroll;
            self.chat_scroll += remaining.div_ceil(2);
        }
    }

    /// Validates and starts an exchange, updating the busy indicator.
    pub fn begin_exchange(&mut self) -> Option<ChatRequest> {
        let request = self.conversation.begin_exchange()?;
        self.status_indicator.set_thinking(true);
        self.status_indicator
            .set_status(format!("Asking Atomia about {}...", request.subject));
        self.scroll_to_latest();
        Some(request)
    }

    pub fn complete_exchange(&mut self, result: AtomiaResult<ChatResponse>) {
        self.conversation.complete_exchange(result);
        self.status_indicator.set_thinking(false);
        self.status_indicator.clear_status();
        self.scroll_to_latest();
    }

    pub fn set_service_status(&mut self, result: AtomiaResult<ServiceInfo>) {
        self.service = match result {
            Ok(info) if info.is_online() => {
                log::info!(
                    "backend online, version {} llm_enabled={}",
                    info.version.as_deref().unwrap_or("?"),
                    info.llm_enabled
                );
                ServiceStatus::Online(info)
            }
            Ok(info) => {
                log::warn!("backend reported status {}", info.status);
                ServiceStatus::Offline
            }
            Err(e) => {
                log::warn!("service probe failed: {}", e);
                ServiceStatus::Offline
            }
        };
    }

    pub fn on_tick(&mut self) {
        self.status_indicator.update_spinner();
    }
}
