// Parley - multi-persona chat orchestrator
// Main entry point

use anyhow::Result;

use parley::backend::create_backend;
use parley::config::load_config;
use parley::server::ChatServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_config()?;

    // Create the configured chat backend
    let backend = create_backend(&config)?;
    tracing::info!(backend = backend.name(), "Chat backend ready");

    // Create and run the server
    let server = ChatServer::new(config, backend);
    server.serve().await?;

    Ok(())
}
