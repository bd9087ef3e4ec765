//! Cardiac Risk API Server
//!
//! HTTP front for the inference and advisory pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CARDIAC RISK SERVICE                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐     ┌──────────────────────────────────────┐ │
//! │  │  API      │     │  Pipeline (cardio-core)              │ │
//! │  │  (Axum)   │────▶│  validate → scale → classify →       │ │
//! │  │           │     │  decode → advise                     │ │
//! │  └───────────┘     └───────────────┬──────────────────────┘ │
//! │                                    ▼                        │
//! │              ┌──────────────┐  ┌─────────────────┐          │
//! │              │  Artifacts   │  │  Gemini (HTTP)  │          │
//! │              │  (JSON)      │  │  or fallback    │          │
//! │              └──────────────┘  └─────────────────┘          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardio_core::constants::{APP_NAME, APP_VERSION};
use cardio_core::{AdvisoryGenerator, InferenceEngine, Pipeline};

pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "cardio_api=debug,cardio_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    init_tracing(&config);

    tracing::info!("{} v{} starting...", APP_NAME, APP_VERSION);
    tracing::info!("Environment: {}", config.environment);

    // Artifacts are required; never bind without them
    let engine = InferenceEngine::load(&config.artifact_dir)
        .inspect_err(|e| tracing::error!("Failed to load model artifacts: {}", e))
        .with_context(|| format!("loading model artifacts from '{}'", config.artifact_dir))?;
    tracing::info!("✅ Model artifacts loaded from {}", config.artifact_dir);

    let advisor = AdvisoryGenerator::from_config(&config.advisory)
        .context("building advisory client")?;
    if advisor.is_enabled() {
        tracing::info!("✅ Advisory client ready ({})", config.advisory.model);
    } else {
        tracing::warn!("Advisory client disabled - fallback advisories only");
    }

    // Build application state
    let state = AppState {
        pipeline: Arc::new(Pipeline::new(engine, advisor)),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Registry + EnvFilter + fmt; JSON lines in production
fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/api/v1/model", get(handlers::model::info))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
