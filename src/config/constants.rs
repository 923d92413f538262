// Project-wide constants
//
// Centralised here so addresses and other magic values have one source
// of truth. Import via `use crate::config::constants::*;`.

/// Default bind address for the HTTP server (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";

/// Token cap applied to every completion call.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Minutes a session may sit idle before its history expires.
pub const DEFAULT_SESSION_TIMEOUT_MINUTES: u64 = 30;

/// How often the idle-session sweeper runs, in seconds.
pub const SESSION_SWEEP_INTERVAL_SECS: u64 = 60;

/// Bounded wait on any backend round trip.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default chat model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Default endpoint of the local Autogen multi-agent service.
pub const DEFAULT_AUTOGEN_URL: &str = "http://127.0.0.1:5001/chat";
