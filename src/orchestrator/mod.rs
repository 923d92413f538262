// Conversation orchestrator — the per-turn state transition
//
// One turn: validate, lock the session, load history, append the user
// message, dispatch to the backend (persona instruction appended last
// when given), fold replies back in, save. A failed backend call saves
// nothing, so persisted state never shows a half-applied turn.

use std::sync::Arc;
use thiserror::Error;

use crate::backend::{BackendError, ChatBackend, ChatRequest};
use crate::config::constants::DEFAULT_MAX_TOKENS;
use crate::conversation::{Message, SessionStore, StoreError};
use crate::personas::Persona;

/// Why a turn was not applied.
#[derive(Debug, Error)]
pub enum TurnError {
    /// Rejected before any state is touched
    #[error("message content cannot be empty")]
    EmptyMessage,

    /// The backend failed or timed out; persisted state is unchanged
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The persistence layer failed; nothing partial was written
    #[error("conversation store failure: {0}")]
    Store(#[from] StoreError),
}

/// Replies produced by one successful turn, in backend order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub replies: Vec<String>,
}

pub struct Orchestrator {
    store: Arc<SessionStore>,
    backend: Arc<dyn ChatBackend>,
    max_tokens: u32,
}

impl Orchestrator {
    pub fn new(store: Arc<SessionStore>, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            store,
            backend,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Process one user turn for a session.
    ///
    /// Turns for the same session serialize on the store's turn lock, so
    /// the load/append/save sequence never interleaves and no update is
    /// lost. The persona instruction (if any) rides along as a trailing
    /// system message for this call only; it is never persisted.
    pub async fn handle_turn(
        &self,
        session_id: &str,
        user_text: &str,
        persona: Option<Persona>,
    ) -> Result<TurnReply, TurnError> {
        if user_text.trim().is_empty() {
            return Err(TurnError::EmptyMessage);
        }

        let lock = self.store.turn_lock(session_id);
        let _turn = lock.lock().await;

        let mut conversation = self.store.load(session_id)?;
        conversation.push(Message::user(user_text));

        let mut outbound = conversation.messages().to_vec();
        if let Some(persona) = persona {
            outbound.push(Message::system(persona.instruction(user_text)));
        }

        let request = ChatRequest::new(outbound).with_max_tokens(self.max_tokens);

        tracing::info!(
            session = session_id,
            backend = self.backend.name(),
            persona = persona.map(|p| p.tag()),
            "Dispatching turn"
        );

        let response = match self.backend.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                // The appended user message dies with this in-memory copy.
                tracing::warn!(session = session_id, error = %e, "Turn discarded");
                return Err(e.into());
            }
        };

        for reply in &response.replies {
            conversation.push(Message::assistant(reply));
        }
        self.store.save(session_id, &conversation)?;

        Ok(TurnReply {
            replies: response.replies,
        })
    }
}
