// HTTP server wiring
//
// Thin transport layer: handlers translate between the wire DTOs and
// the orchestrator, and map its error taxonomy onto status codes.

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::{ErrorResponse, HistoryResponse, TurnRequest, TurnResponse};

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::backend::ChatBackend;
use crate::config::constants::SESSION_SWEEP_INTERVAL_SECS;
use crate::config::Config;
use crate::conversation::SessionStore;
use crate::orchestrator::Orchestrator;

/// Shared handler state.
pub struct ServerState {
    pub orchestrator: Orchestrator,
    pub store: Arc<SessionStore>,
}

pub struct ChatServer {
    state: Arc<ServerState>,
    config: Config,
}

impl ChatServer {
    pub fn new(config: Config, backend: Box<dyn ChatBackend>) -> Self {
        let store = Arc::new(SessionStore::new());
        let backend: Arc<dyn ChatBackend> = Arc::from(backend);
        let orchestrator = Orchestrator::new(Arc::clone(&store), backend);

        Self {
            state: Arc::new(ServerState {
                orchestrator,
                store,
            }),
            config,
        }
    }

    /// Start the HTTP server.
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self.config.bind_address.parse()?;

        // Sweep idle sessions in the background so history honors the
        // configured timeout.
        let store = Arc::clone(&self.state.store);
        let max_idle = Duration::from_secs(self.config.session_timeout_minutes * 60);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(SESSION_SWEEP_INTERVAL_SECS));
            loop {
                interval.tick().await;
                store.purge_idle(max_idle);
                tracing::debug!(active = store.active_count(), "Idle session sweep");
            }
        });

        // Body size limit guards against oversized foreign payloads;
        // 1MB is generous for natural-language chat turns.
        let app = create_router(self.state)
            .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
            .layer(TraceLayer::new_for_http());

        tracing::info!("Starting parley server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
