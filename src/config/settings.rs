// Configuration structs

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_AUTOGEN_URL, DEFAULT_HTTP_ADDR, DEFAULT_SESSION_TIMEOUT_MINUTES,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bind address (e.g., "127.0.0.1:8000")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Minutes of inactivity before a session's history is dropped
    #[serde(default = "default_session_timeout")]
    pub session_timeout_minutes: u64,

    /// Which chat backend handles completions
    pub backend: BackendConfig,
}

/// Backend selection. Both variants satisfy the same adapter contract;
/// the orchestrator never knows which one is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    Openai {
        api_key: String,
        #[serde(default)]
        org_id: Option<String>,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        base_url: Option<String>,
    },
    Autogen {
        #[serde(default = "default_autogen_url")]
        url: String,
    },
}

impl Config {
    /// Minimal config for an OpenAI key alone (environment fallback path).
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            bind_address: default_bind_address(),
            session_timeout_minutes: default_session_timeout(),
            backend: BackendConfig::Openai {
                api_key,
                org_id: None,
                model: None,
                base_url: None,
            },
        }
    }
}

fn default_bind_address() -> String {
    DEFAULT_HTTP_ADDR.to_string()
}

fn default_session_timeout() -> u64 {
    DEFAULT_SESSION_TIMEOUT_MINUTES
}

fn default_autogen_url() -> String {
    DEFAULT_AUTOGEN_URL.to_string()
}
