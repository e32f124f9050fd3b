// Dashboard service - Lays out registered series in page order
use crate::domain::dashboard::{Dashboard, DashboardSection, Panel};
use crate::domain::registry::SeriesRegistry;
use crate::infrastructure::config::{SeriesCatalog, SourceKind};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    registry: Arc<SeriesRegistry>,
    catalog: SeriesCatalog,
}

impl DashboardService {
    pub fn new(registry: Arc<SeriesRegistry>, catalog: SeriesCatalog) -> Self {
        Self { registry, catalog }
    }

    /// One section per source, panels in catalog order. Unresolved series stay as placeholders.
    pub async fn get_dashboard(&self) -> Dashboard {
        let (revision, snapshot) = self.registry.versioned_snapshot().await;

        let sections = SourceKind::ALL
            .iter()
            .map(|kind| DashboardSection {
                title: kind.section_title().to_string(),
                panels: self
                    .catalog
                    .for_source(*kind)
                    .map(|definition| Panel {
                        key: definition.key.clone(),
                        series: snapshot.get(&definition.key).cloned(),
                    })
                    .collect(),
            })
            .collect();

        Dashboard::new(revision, sections)
    }
}
