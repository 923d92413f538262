// Chat-completion backend abstraction
//
// The orchestrator only sees this trait; provider specifics (OpenAI's
// chat completions, the local Autogen multi-agent service) live behind
// it and are selected at startup by the factory.

use async_trait::async_trait;
use thiserror::Error;

pub mod autogen;
pub mod factory;
pub mod openai;
mod types;

pub use autogen::AutogenBackend;
pub use factory::create_backend;
pub use openai::OpenAiBackend;
pub use types::{ChatRequest, ChatResponse};

/// Failures a backend may surface. Adapters never panic or hang across
/// this boundary; a bounded wait that elapses becomes `Timeout`.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request timed out")]
    Timeout,

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to reach backend: {0}")]
    Transport(String),

    #[error("failed to parse backend response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_decode() {
            BackendError::Malformed(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

/// Trait for chat-completion backends.
///
/// `complete` takes the full outbound message list for one turn and
/// returns the backend's candidate replies in order. Implementations
/// must not mutate the request.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError>;

    /// Backend name for logging (e.g. "openai", "autogen")
    fn name(&self) -> &str;
}
