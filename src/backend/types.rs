// Backend request/response types

use crate::conversation::Message;

/// One outbound completion call. Constructed fresh per turn and never
/// retained.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Ordered message list, persona instruction (if any) last
    pub messages: Vec<Message>,

    /// Cap on the backend's generated reply length
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            max_tokens: crate::config::constants::DEFAULT_MAX_TOKENS,
        }
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Candidate replies from one completion call, in backend order. Each
/// entry becomes its own assistant turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub replies: Vec<String>,
}

impl ChatResponse {
    pub fn new(replies: Vec<String>) -> Self {
        Self { replies }
    }
}
