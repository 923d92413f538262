// Wire types for the HTTP surface

use serde::{Deserialize, Serialize};

use crate::conversation::Message;

/// Body for POST /v1/turns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    /// Omit to start a fresh session; the minted id comes back in the
    /// response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// The user's message text
    pub message: String,

    /// Optional persona tag (e.g. "planner", "qa")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
}

/// Response for POST /v1/turns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub session_id: String,
    /// Assistant replies for this turn, in backend order
    pub messages: Vec<String>,
}

/// Response for GET /v1/history/:session_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub messages: Vec<Message>,
}

/// Uniform error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
