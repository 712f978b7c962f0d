//! Medlens HTTP server binary.

use medlens_engine::{EngineConfig, ReportAnalyzer};
use medlens_service::{MedlensServer, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServiceConfig::from_env();
    let engine_config = EngineConfig::default();
    tracing::info!(
        max_label_len = engine_config.max_label_len,
        max_imaging_findings = engine_config.max_imaging_findings,
        "Engine configured"
    );

    let server = MedlensServer::new(ReportAnalyzer::new(engine_config));

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting medlens HTTP server on {}", addr);
    tracing::info!("Routes available: GET /health, POST /analyze, POST /chat");

    axum::serve(listener, server.router()).await?;

    Ok(())
}
