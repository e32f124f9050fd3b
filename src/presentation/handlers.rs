// HTTP request handlers - read-only views of the registry for the renderer
use crate::domain::dashboard::Dashboard;
use crate::domain::registry::RegistrySnapshot;
use crate::domain::series::Series;
use crate::presentation::app_state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use futures::StreamExt;
use serde::Serialize;
use std::sync::Arc;
use tokio_stream::wrappers::WatchStream;

#[derive(Debug, Serialize)]
pub struct RegistryUpdate {
    pub revision: u64,
    pub keys: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Every series registered so far
pub async fn list_series(State(state): State<Arc<AppState>>) -> Json<RegistrySnapshot> {
    Json(state.registry.get_all().await)
}

/// A single series, 404 until its source has resolved
pub async fn get_series(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Arc<Series>>, StatusCode> {
    state
        .registry
        .get(&key)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Page layout with placeholders for unresolved series
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    let dashboard = state.dashboard_service.get_dashboard().await;
    let pending = dashboard.missing_keys();
    if !pending.is_empty() {
        tracing::debug!("Dashboard revision {} still waiting on {:?}", dashboard.revision, pending);
    }
    Json(dashboard)
}

/// Newline-delimited JSON: one line with the current keys, then one per registry change
pub async fn stream_updates(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let registry = state.registry.clone();
    let mut revisions = WatchStream::new(registry.subscribe());

    let stream = async_stream::stream! {
        while let Some(revision) = revisions.next().await {
            let update = RegistryUpdate {
                revision,
                keys: registry.keys().await,
            };
            match serde_json::to_vec(&update) {
                Ok(mut line) => {
                    line.push(b'\n');
                    yield Ok::<Bytes, std::io::Error>(Bytes::from(line));
                }
                Err(e) => {
                    tracing::error!("Failed to encode registry update: {}", e);
                    break;
                }
            }
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .body(Body::from_stream(stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::domain::registry::SeriesRegistry;
    use crate::domain::series::Sample;
    use crate::infrastructure::config::SeriesCatalog;

    async fn state() -> Arc<AppState> {
        let catalog: SeriesCatalog = toml::from_str(include_str!("../../config/series.toml")).unwrap();
        let registry = Arc::new(SeriesRegistry::new());
        registry
            .register(
                "airTempData",
                Series::new("Air".to_string(), vec![Sample { x: 0, y: 288.1 }]),
            )
            .await
            .unwrap();

        Arc::new(AppState {
            registry: registry.clone(),
            dashboard_service: DashboardService::new(registry, catalog),
        })
    }

    #[tokio::test]
    async fn test_list_series() {
        let Json(snapshot) = list_series(State(state().await)).await;
        assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["airTempData"]);
    }

    #[tokio::test]
    async fn test_get_series_found_and_missing() {
        let state = state().await;

        let Json(series) = get_series(Path("airTempData".to_string()), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(series.label, "Air");

        let missing = get_series(Path("windDirData".to_string()), State(state)).await;
        assert_eq!(missing.unwrap_err(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_view() {
        let Json(dashboard) = get_dashboard(State(state().await)).await;
        assert_eq!(dashboard.sections.len(), 2);
        assert_eq!(dashboard.missing_keys().len(), 6);
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "ok");
    }
}
