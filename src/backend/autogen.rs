// Autogen multi-agent backend
//
// Talks to the local Flask service that fronts an Autogen group chat:
// POST {"input": <text>} and a free-form JSON payload back. It fills the
// same `ChatBackend` contract as the cloud providers; selection happens
// in the factory, not at the call sites.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use super::types::{ChatRequest, ChatResponse};
use super::{BackendError, ChatBackend};
use crate::config::constants::REQUEST_TIMEOUT_SECS;
use crate::conversation::Role;

pub struct AutogenBackend {
    client: Client,
    endpoint: String,
}

impl AutogenBackend {
    pub fn new(endpoint: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ChatBackend for AutogenBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        // The Autogen service is single-input: it takes the newest user
        // text, not the full history.
        let input = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        tracing::debug!(endpoint = %self.endpoint, "Sending input to Autogen service");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "input": input }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        Ok(ChatResponse::new(flatten_replies(&payload)))
    }

    fn name(&self) -> &str {
        "autogen"
    }
}

/// Flatten the service's free-form JSON into reply strings.
///
/// Strings pass through, arrays flatten element-wise, and objects yield
/// their "content" field when present. Anything else is rendered as
/// compact JSON so no agent output is silently dropped.
fn flatten_replies(payload: &Value) -> Vec<String> {
    match payload {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(flatten_replies).collect(),
        Value::Object(map) => match map.get("content") {
            Some(content) => flatten_replies(content),
            None => vec![payload.to_string()],
        },
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Message;

    #[test]
    fn test_flatten_string_payload() {
        assert_eq!(flatten_replies(&json!("hello")), vec!["hello"]);
    }

    #[test]
    fn test_flatten_message_array() {
        let payload = json!([
            {"role": "planner", "content": "step one"},
            {"role": "critic", "content": "step two"}
        ]);
        assert_eq!(flatten_replies(&payload), vec!["step one", "step two"]);
    }

    #[test]
    fn test_flatten_object_without_content_kept_as_json() {
        let payload = json!({"verdict": "ok"});
        assert_eq!(flatten_replies(&payload), vec![r#"{"verdict":"ok"}"#]);
    }

    #[tokio::test]
    async fn test_complete_posts_latest_user_input() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat")
            .match_body(mockito::Matcher::Json(json!({"input": "second question"})))
            .with_status(200)
            .with_body(r#"[{"role":"assistant","content":"an answer"}]"#)
            .create_async()
            .await;

        let backend = AutogenBackend::new(format!("{}/chat", server.url())).unwrap();
        let request = ChatRequest::new(vec![
            Message::user("first question"),
            Message::assistant("first answer"),
            Message::user("second question"),
        ]);
        let response = backend.complete(&request).await.unwrap();

        assert_eq!(response.replies, vec!["an answer"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat")
            .with_status(500)
            .with_body("agent crashed")
            .create_async()
            .await;

        let backend = AutogenBackend::new(format!("{}/chat", server.url())).unwrap();
        let request = ChatRequest::new(vec![Message::user("hi")]);
        let err = backend.complete(&request).await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 500, .. }));
    }
}
