use serde::{Deserialize, Serialize};

/// Static settings of the console. Provided through context at startup.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConsoleConfig {
    pub api_base: String,
    pub request_timeout_ms: u32,
    pub channel_refresh_ms: u32,
    pub toast_duration_ms: u32,
    pub copied_hint_ms: u32,
    pub session_cookie: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            request_timeout_ms: 10_000,
            channel_refresh_ms: 15_000,
            toast_duration_ms: 3_000,
            copied_hint_ms: 3_000,
            session_cookie: "mysession".to_string(),
        }
    }
}

/// Key of the persisted [`crate::types::UiPrefs`] in `localStorage`.
pub const PREFS_STORAGE_KEY: &str = "livetv.prefs";

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Parser assumed by the backend when a record carries none.
pub const DEFAULT_PARSER: &str = "http";
