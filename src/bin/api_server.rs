// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the size resolver
// Usage: cargo run --features api --bin api_server

use stocking_sizer::api_server::DEFAULT_LOG_FILTER;
use stocking_sizer::{create_router, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    // SIZE_TABLE: optional catalog JSON replacing the builtin table
    let table_path = std::env::var("SIZE_TABLE").ok();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Configuration:");
    tracing::info!("  SIZE_TABLE: {}", table_path.as_deref().unwrap_or("<builtin>"));
    tracing::info!("  PORT: {}", port);

    let state = AppState::load(table_path.as_deref())?;
    tracing::info!("Size table ready ({} lists)", state.table.len());

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
