// Main entry point - Dependency injection, pipeline run and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::pipeline_service::{PipelineService, SourceOutcome};
use crate::application::source_reader::SourceReader;
use crate::domain::registry::SeriesRegistry;
use crate::infrastructure::config::{load_app_config, load_series_catalog, SourceKind};
use crate::infrastructure::file_source::FileSourceReader;
use crate::infrastructure::http_source::{is_http_location, HttpSourceReader};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_series, health_check, list_series, stream_updates,
};

fn source_reader_for(location: &str) -> Arc<dyn SourceReader> {
    if is_http_location(location) {
        Arc::new(HttpSourceReader::new(location.to_string()))
    } else {
        Arc::new(FileSourceReader::new(location.to_string()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config().context("Failed to load config/sources")?;
    let catalog = load_series_catalog().context("Failed to load config/series")?;

    let registry = Arc::new(SeriesRegistry::new());

    // Wire one reader per source
    let mut pipeline = PipelineService::new(registry.clone(), catalog.clone());
    for kind in SourceKind::ALL {
        pipeline = pipeline.with_reader(kind, source_reader_for(app_config.sources.location(kind)));
    }

    // The batch load runs alongside the server; readers see series as they land
    tokio::spawn(async move {
        let report = pipeline.run().await;
        for (kind, outcome) in &report.sources {
            match outcome {
                SourceOutcome::Registered(counts) => {
                    for (key, count) in counts {
                        tracing::info!("{} source: {} has {} samples", kind, key, count);
                    }
                }
                SourceOutcome::Failed(reason) => {
                    tracing::warn!("{} source data unavailable: {}", kind, reason);
                }
            }
        }
        if !SourceKind::ALL.iter().any(|kind| report.succeeded(*kind)) {
            tracing::error!("No source resolved; every panel will show a placeholder");
        }
    });

    let state = Arc::new(AppState {
        registry: registry.clone(),
        dashboard_service: DashboardService::new(registry, catalog),
    });

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/series", get(list_series))
        .route("/series/:key", get(get_series))
        .route("/dashboard", get(get_dashboard))
        .route("/updates", get(stream_updates))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = app_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", app_config.server.bind))?;
    tracing::info!("Starting sensor-charts service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
