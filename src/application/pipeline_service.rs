// Pipeline service - one fetch-and-process chain per source, merged into the registry
use crate::application::chronology::sort_by_instant;
use crate::application::circular::{axis_ticks, unwrap_circular};
use crate::application::record_parser::{parse_csv_records, parse_json_records, ParseError};
use crate::application::series_extractor::extract_series;
use crate::application::source_reader::SourceReader;
use crate::domain::record::RawRecord;
use crate::domain::registry::SeriesRegistry;
use crate::domain::series::{AxisConfig, ChartOptions, Series};
use crate::infrastructure::config::{SeriesCatalog, SeriesConfig, SourceKind};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_kind} source {location} unavailable: {reason}")]
    Unavailable {
        source_kind: SourceKind,
        location: String,
        reason: String,
    },

    #[error("{source_kind} source {location} is malformed: {error}")]
    Malformed {
        source_kind: SourceKind,
        location: String,
        #[source]
        error: ParseError,
    },
}

/// Every series derived from one source, delivered to the registry in one piece.
#[derive(Debug)]
pub struct SourceBatch {
    pub source: SourceKind,
    pub series: Vec<(String, Series)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    /// Registered keys with their sample counts
    Registered(Vec<(String, usize)>),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub sources: BTreeMap<SourceKind, SourceOutcome>,
}

impl PipelineReport {
    pub fn succeeded(&self, kind: SourceKind) -> bool {
        matches!(self.sources.get(&kind), Some(SourceOutcome::Registered(_)))
    }
}

type ChainResult = (SourceKind, Result<SourceBatch, SourceError>);

#[derive(Clone)]
pub struct PipelineService {
    registry: Arc<SeriesRegistry>,
    catalog: SeriesCatalog,
    readers: HashMap<SourceKind, Arc<dyn SourceReader>>,
}

impl PipelineService {
    pub fn new(registry: Arc<SeriesRegistry>, catalog: SeriesCatalog) -> Self {
        Self {
            registry,
            catalog,
            readers: HashMap::new(),
        }
    }

    pub fn with_reader(mut self, kind: SourceKind, reader: Arc<dyn SourceReader>) -> Self {
        self.readers.insert(kind, reader);
        self
    }

    /// Run both chains concurrently and apply each finished batch to the registry.
    ///
    /// A failing chain only loses its own keys; the sibling's batch is still registered.
    pub async fn run(&self) -> PipelineReport {
        let (tx, mut rx) = mpsc::channel::<ChainResult>(SourceKind::ALL.len());
        let mut report = PipelineReport::default();

        for kind in SourceKind::ALL {
            let Some(reader) = self.readers.get(&kind).cloned() else {
                tracing::warn!("No reader configured for {} source, skipping", kind);
                report
                    .sources
                    .insert(kind, SourceOutcome::Failed("no reader configured".to_string()));
                continue;
            };

            let definitions: Vec<SeriesConfig> = self.catalog.for_source(kind).cloned().collect();
            let tx = tx.clone();

            tokio::spawn(async move {
                let result = process_source(kind, reader.as_ref(), &definitions).await;
                let _ = tx.send((kind, result)).await;
            });
        }
        drop(tx);

        while let Some((kind, result)) = rx.recv().await {
            let outcome = match result {
                Ok(batch) => self.apply_batch(batch).await,
                Err(e) => {
                    tracing::warn!("{}", e);
                    SourceOutcome::Failed(e.to_string())
                }
            };
            report.sources.insert(kind, outcome);
        }

        // A chain that panicked never reports back
        for kind in SourceKind::ALL {
            report
                .sources
                .entry(kind)
                .or_insert_with(|| SourceOutcome::Failed("chain did not complete".to_string()));
        }

        report
    }

    async fn apply_batch(&self, batch: SourceBatch) -> SourceOutcome {
        let counts: Vec<(String, usize)> = batch
            .series
            .iter()
            .map(|(key, series)| (key.clone(), series.len()))
            .collect();

        match self.registry.register_batch(batch.series).await {
            Ok(()) => {
                tracing::info!("Registered {} series from {} source", counts.len(), batch.source);
                SourceOutcome::Registered(counts)
            }
            Err(e) => {
                tracing::error!("Rejected {} batch: {}", batch.source, e);
                SourceOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Fetch, parse and derive every configured series for one source.
pub async fn process_source(
    kind: SourceKind,
    reader: &dyn SourceReader,
    definitions: &[SeriesConfig],
) -> Result<SourceBatch, SourceError> {
    let start_time = Instant::now();
    let location = reader.location().to_string();
    tracing::info!("Fetching {} source from {}", kind, location);

    let raw = reader
        .fetch_text()
        .await
        .map_err(|e| SourceError::Unavailable {
            source_kind: kind,
            location: location.clone(),
            reason: format!("{:#}", e),
        })?;

    let records = parse_records(kind, &raw).map_err(|error| SourceError::Malformed {
        source_kind: kind,
        location: location.clone(),
        error,
    })?;

    let series: Vec<(String, Series)> = definitions
        .iter()
        .map(|definition| (definition.key.clone(), build_series(&records, definition)))
        .collect();

    for (key, derived) in series.iter().filter(|(_, s)| s.is_empty()) {
        tracing::debug!("Series {} ({}) has no readings in {}", key, derived.label, location);
    }

    tracing::info!(
        "Processed {} records from {} in {} ms",
        records.len(),
        location,
        start_time.elapsed().as_millis()
    );

    Ok(SourceBatch { source: kind, series })
}

pub fn parse_records(kind: SourceKind, raw: &str) -> Result<Vec<RawRecord>, ParseError> {
    match kind {
        SourceKind::Json => parse_json_records(raw),
        SourceKind::Csv => parse_csv_records(raw),
    }
}

/// Extract one series and apply the corrections its definition asks for.
pub fn build_series(records: &[RawRecord], definition: &SeriesConfig) -> Series {
    let extracted = extract_series(records, &definition.field, &definition.label);
    let mut points = extracted.points;

    if let Some(circular) = definition.circular {
        points = unwrap_circular(points, circular.period, circular.split_threshold);
    }
    if definition.ordered {
        points = sort_by_instant(points);
    }

    let series = Series::new(extracted.label, points).with_color(definition.color.clone());
    match definition.circular {
        Some(circular) => {
            let axis = AxisConfig {
                period: circular.period,
                step_size: circular.step_size,
            };
            let ticks = series
                .y_range()
                .map(|(lo, hi)| axis_ticks(lo, hi, &axis))
                .unwrap_or_default();
            series.with_options(ChartOptions::circular(axis, ticks))
        }
        None => series,
    }
}
