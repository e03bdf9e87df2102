//! Binary entry point for the parley server

use parley_core::{init_logging, ServiceConfig};
use parley_server::AppState;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("PARLEY_CONFIG") {
        Ok(path) => ServiceConfig::load(path)?,
        Err(_) => ServiceConfig::from_env()?,
    };

    init_logging(&config.logging);

    let state = AppState::from_config(&config)?;
    let app = parley_server::app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Parley server listening on http://{}", addr);
    tracing::info!("  POST   /api/v1/ask - ask a question");
    tracing::info!("  GET    /api/v1/sessions - list session ids");
    tracing::info!("  GET    /api/v1/sessions/:id/history - conversation history");
    tracing::info!("  DELETE /api/v1/sessions/:id - clear a session");
    tracing::info!("  GET    /api/v1/tools - list registered tools");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
