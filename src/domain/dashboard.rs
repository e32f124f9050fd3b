// Dashboard domain model - page layout over whatever series have resolved
use super::series::Series;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub key: String,
    /// `None` until the owning source resolves; renderers show a placeholder.
    pub series: Option<Arc<Series>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSection {
    pub title: String,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub revision: u64,
    pub sections: Vec<DashboardSection>,
}

impl Dashboard {
    pub fn new(revision: u64, sections: Vec<DashboardSection>) -> Self {
        Self { revision, sections }
    }

    pub fn missing_keys(&self) -> Vec<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.panels.iter())
            .filter(|p| p.series.is_none())
            .map(|p| p.key.as_str())
            .collect()
    }
}
