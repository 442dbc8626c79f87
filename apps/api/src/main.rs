mod auth;
mod candidates;
mod config;
mod db;
mod errors;
mod evaluator;
mod interviews;
mod jobs;
mod llm_client;
mod models;
mod routes;
mod state;
mod telephony;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::evaluator::{CannedEvaluator, Evaluator, LlmEvaluator};
use crate::interviews::locks::InterviewLocks;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::telephony::{CallPlacer, RecordingStore, SimulatedCaller, VonageCaller};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (pool + migrations)
    let db = create_pool(&config.database_url).await?;

    // Select the two collaborators once, from configuration.
    let (evaluator, placer, recordings): (
        Arc<dyn Evaluator>,
        Arc<dyn CallPlacer>,
        Option<RecordingStore>,
    ) = match &config.live {
        None => {
            info!("DEVELOPMENT MODE: calls are simulated, scoring is deterministic");
            info!("Use POST /v1/dev/simulate-answers/:interview_id after triggering an interview");
            (Arc::new(CannedEvaluator), Arc::new(SimulatedCaller), None)
        }
        Some(live) => {
            info!("PRODUCTION MODE: real calls via Vonage, scoring via {}", llm_client::MODEL);
            let llm = LlmClient::new(live.anthropic_api_key.clone());
            let caller = VonageCaller::new(live)?;
            let store = RecordingStore::connect(live).await;
            (
                Arc::new(LlmEvaluator::new(llm)),
                Arc::new(caller),
                Some(store),
            )
        }
    };

    let state = AppState {
        db,
        config: config.clone(),
        evaluator,
        placer,
        recordings,
        http: reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client"),
        locks: InterviewLocks::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
