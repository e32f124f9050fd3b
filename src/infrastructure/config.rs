use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

const ENV_PREFIX: &str = "SENSOR_CHARTS";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: SourceSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    #[serde(default = "default_json_source")]
    pub json: String,
    #[serde(default = "default_csv_source")]
    pub csv: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            json: default_json_source(),
            csv: default_csv_source(),
        }
    }
}

impl SourceSettings {
    pub fn location(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Json => &self.json,
            SourceKind::Csv => &self.csv,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

fn default_json_source() -> String {
    "http://localhost:3000/data.json".to_string()
}

fn default_csv_source() -> String {
    "http://localhost:3000/data.csv".to_string()
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Json,
    Csv,
}

impl SourceKind {
    pub const ALL: [SourceKind; 2] = [SourceKind::Json, SourceKind::Csv];

    pub fn section_title(&self) -> &'static str {
        match self {
            SourceKind::Json => "JSON data plots",
            SourceKind::Csv => "CSV data plots",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Json => write!(f, "json"),
            SourceKind::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesCatalog {
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub key: String,
    pub source: SourceKind,
    pub field: String,
    pub label: String,
    pub color: Option<String>,
    /// Sort by instant after extraction; set for sources that append late entries out of order.
    #[serde(default)]
    pub ordered: bool,
    pub circular: Option<CircularConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct CircularConfig {
    #[serde(default = "default_period")]
    pub period: f64,
    pub split_threshold: f64,
    #[serde(default = "default_step")]
    pub step_size: f64,
}

fn default_period() -> f64 {
    crate::application::circular::FULL_TURN_DEGREES
}

fn default_step() -> f64 {
    crate::application::circular::DEFAULT_STEP_DEGREES
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("series key '{0}' is declared more than once")]
    DuplicateKey(String),

    #[error("series '{key}': {message}")]
    InvalidCircular { key: String, message: String },
}

impl SeriesCatalog {
    pub fn for_source(&self, kind: SourceKind) -> impl Iterator<Item = &SeriesConfig> {
        self.series.iter().filter(move |s| s.source == kind)
    }

    /// Reject duplicate keys and circular settings that would break the unwrap heuristic.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut keys = HashSet::new();
        for series in &self.series {
            if !keys.insert(series.key.as_str()) {
                return Err(ConfigError::DuplicateKey(series.key.clone()));
            }

            if let Some(circular) = &series.circular {
                let invalid = |message: &str| ConfigError::InvalidCircular {
                    key: series.key.clone(),
                    message: message.to_string(),
                };

                if !(circular.period.is_finite() && circular.period > 0.0) {
                    return Err(invalid("period must be a positive number"));
                }
                if !(circular.step_size.is_finite() && circular.step_size > 0.0) {
                    return Err(invalid("step_size must be a positive number"));
                }
                if !(circular.split_threshold.is_finite()
                    && circular.split_threshold >= 0.0
                    && circular.split_threshold <= circular.period)
                {
                    return Err(invalid("split_threshold must lie in [0, period]"));
                }
            }
        }
        Ok(())
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/sources").required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_series_catalog() -> anyhow::Result<SeriesCatalog> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/series"))
        .build()?;

    let catalog: SeriesCatalog = settings.try_deserialize()?;
    catalog.validate()?;
    Ok(catalog)
}
