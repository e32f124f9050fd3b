// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::domain::registry::SeriesRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SeriesRegistry>,
    pub dashboard_service: DashboardService,
}
