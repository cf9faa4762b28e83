// API Constants
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const CHAT_ENDPOINT: &str = "/chat";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const API_URL_ENV: &str = "ATOMIA_API_URL";

/// Shown in place of a reply whenever an exchange fails for any reason.
pub const FALLBACK_REPLY: &str = "⚠️ Unable to reach Atomia API. Please try again.";

// UI Constants
pub const APP_TITLE: &str = "Atomia · AI Doubt Partner";
pub const TICK_RATE_MS: u64 = 100;
pub const SEND_LABEL: &str = "[ Send ⏎ ]";
pub const INPUT_PREFIX: &str = "→ ";
