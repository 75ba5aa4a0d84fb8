mod config;
mod errors;
mod llm_client;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::batch::Screener;
use crate::screening::extract::SniffingRenderer;
use crate::screening::judge::{AbsentJudge, ClaudeJudge, TextJudge};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume screener v{}", env!("CARGO_PKG_VERSION"));

    // Semantic judge is optional; without a key every batch is keyword-scored
    let judge: Arc<dyn TextJudge> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("Semantic judge enabled (model: {})", llm_client::MODEL);
            Arc::new(ClaudeJudge::new(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; semantic judge disabled");
            Arc::new(AbsentJudge)
        }
    };

    info!(
        "Screening config: {} lines/page, eligible at {}%, context radius {}, judge delay {}ms",
        config.screening.lines_per_page,
        config.screening.threshold_percent,
        config.screening.context_radius,
        config.screening.judge_delay.as_millis()
    );

    let screener = Screener::new(
        Arc::new(SniffingRenderer::new()),
        judge,
        config.screening.clone(),
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        screener,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
