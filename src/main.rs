use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use marketing_assistant::config::Config;
use marketing_assistant::gemini::GeminiClient;
use marketing_assistant::routes::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    tracing::info!(model = %config.model, mode = ?config.instruction_mode, "Using Gemini at {}", config.api_base);

    let gemini = GeminiClient::new(&config)?;
    let app = build_app(AppState::new(Arc::new(gemini)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
