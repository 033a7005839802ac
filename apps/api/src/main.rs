mod assessment;
mod config;
mod errors;
mod extraction;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::{CriteriaRegistry, RuleSegmenter};
use crate::config::Config;
use crate::extraction::ExtractionConfig;
use crate::routes::build_router;
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

    info!("Starting assessor v{}", env!("CARGO_PKG_VERSION"));

    // A misconfigured registry must stop the process before it binds a port
    let registry = CriteriaRegistry::o1a().context("invalid criteria registry")?;
    info!("Criteria registry loaded ({} criteria)", registry.len());
    for criterion in registry.iter() {
        debug!(
            criterion = criterion.name(),
            keywords = ?criterion.keywords(),
            "Criterion registered"
        );
    }

    let extraction = ExtractionConfig::from_config(&config);
    info!(
        "OCR via '{}' (lang: {}, timeout: {:?})",
        extraction.tesseract_cmd, extraction.ocr_language, extraction.ocr_timeout
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        registry: Arc::new(registry),
        segmenter: Arc::new(RuleSegmenter::english()),
        extraction,
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
