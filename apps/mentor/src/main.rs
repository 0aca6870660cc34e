mod config;
mod errors;
mod llm_client;
mod mentoring;
mod questions;
mod routes;
mod state;
mod submission;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::questions::QuestionStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mentor API v{}", env!("CARGO_PKG_VERSION"));

    std::fs::create_dir_all(&config.upload_dir).with_context(|| {
        format!(
            "Failed to create upload directory {}",
            config.upload_dir.display()
        )
    })?;
    info!("Upload directory: {}", config.upload_dir.display());

    // Initialize LLM clients
    let classifier = LlmClient::from_config(&config, &config.classifier_model)?;
    let mentor = LlmClient::from_config(&config, &config.llm_model)?;
    info!(
        "LLM clients initialized (classifier: {}, mentor: {}, endpoint: {})",
        classifier.model(),
        mentor.model(),
        config.llm_base_url
    );

    let questions = QuestionStore::new(config.questions_csv_path.clone());
    info!("Question dataset: {}", config.questions_csv_path.display());

    // Build app state
    let state = AppState {
        config: config.clone(),
        questions,
        classifier: Arc::new(classifier),
        mentor: Arc::new(mentor),
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
