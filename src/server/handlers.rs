// Request handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use super::types::{ErrorResponse, HistoryResponse, TurnRequest, TurnResponse};
use super::ServerState;
use crate::orchestrator::TurnError;
use crate::personas::Persona;

/// Build the axum router with all routes.
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/turns", post(handle_turn))
        .route("/v1/history/:session_id", get(handle_history))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// POST /v1/turns — submit one user turn, optionally through a persona.
async fn handle_turn(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<TurnRequest>,
) -> Response {
    // Unknown persona tags are rejected here, before the orchestrator
    // touches any session state.
    let persona = match request.persona.as_deref().map(str::parse::<Persona>) {
        Some(Ok(p)) => Some(p),
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        None => None,
    };

    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    match state
        .orchestrator
        .handle_turn(&session_id, &request.message, persona)
        .await
    {
        Ok(reply) => (
            StatusCode::OK,
            Json(TurnResponse {
                session_id,
                messages: reply.replies,
            }),
        )
            .into_response(),
        Err(e) => {
            let status = match &e {
                TurnError::EmptyMessage => StatusCode::BAD_REQUEST,
                TurnError::Backend(_) => StatusCode::BAD_GATEWAY,
                TurnError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, e.to_string())
        }
    }
}

/// GET /v1/history/:session_id — the persisted conversation.
async fn handle_history(
    State(state): State<Arc<ServerState>>,
    Path(session_id): Path<String>,
) -> Response {
    match state.store.load(&session_id) {
        Ok(conversation) => (
            StatusCode::OK,
            Json(HistoryResponse {
                session_id,
                messages: conversation.messages().to_vec(),
            }),
        )
            .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}
