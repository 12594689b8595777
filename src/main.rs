// src/main.rs

use std::env;
use std::net::SocketAddr;
use std::process::ExitCode;

use anyhow::{Context, Result};
use solafon_mcp_server::{
    api,
    config::{Config, DEFAULT_LOG_FILTER},
    mcp::stdio,
    AppState,
};
use tokio::io;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// --- HTTP Server Logic ---
async fn run_http_server(state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], state.config.port));
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🚀 HTTP Server listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("HTTP server terminated")?;
    Ok(())
}

// --- MCP Server Logic ---
async fn run_mcp_server(state: AppState) {
    info!("🚀 Starting MCP server on stdin/stdout...");
    stdio::serve(state, io::BufReader::new(io::stdin()), io::stdout()).await;
    info!("MCP server shutting down");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for protocol traffic
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("❌ Failed to load configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if !config.has_bot_token() {
        warn!("SOLAFON_BOT_TOKEN is not set; bot endpoints will reject requests");
    }

    let app_state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Failed to initialize Solafon client: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Using Solafon API at {}", app_state.client.base_url());

    // stdio unless HTTP was asked for
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--http") || env::var("HTTP_MODE").is_ok() {
        if let Err(e) = run_http_server(app_state).await {
            error!("❌ {:#}", e);
            return ExitCode::FAILURE;
        }
    } else {
        run_mcp_server(app_state).await;
    }

    ExitCode::SUCCESS
}
