// Record parser - raw JSON / CSV text into uniform records
use crate::domain::record::{RawRecord, RawValue};
use std::collections::HashMap;
use thiserror::Error;

/// Name of the timestamp column every CSV source must carry.
pub const CSV_TIMESTAMP_COLUMN: &str = "datetime";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a mapping of timestamp to record at the top level, found {found}")]
    NotAMapping { found: &'static str },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV header has no '{column}' column")]
    MissingColumn { column: &'static str },
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Parse a JSON document keyed by timestamp.
///
/// Records come out in the document's key order, which is not necessarily chronological.
/// Timestamps are not validated here. Entries that are not objects carry no readings and are
/// skipped; only a non-mapping document is an error.
pub fn parse_json_records(raw: &str) -> Result<Vec<RawRecord>, ParseError> {
    let document: serde_json::Value = serde_json::from_str(raw)?;
    let entries = match document {
        serde_json::Value::Object(entries) => entries,
        other => {
            return Err(ParseError::NotAMapping {
                found: json_kind(&other),
            });
        }
    };

    let total = entries.len();
    let records: Vec<RawRecord> = entries
        .into_iter()
        .filter_map(|(timestamp, entry)| match entry {
            serde_json::Value::Object(fields) => {
                let fields = fields
                    .iter()
                    .map(|(name, value)| (name.clone(), RawValue::from(value)))
                    .collect();
                Some(RawRecord::new(timestamp, fields))
            }
            _ => None,
        })
        .collect();

    if records.len() < total {
        tracing::debug!(
            "Skipped {} of {} JSON entries that are not records",
            total - records.len(),
            total
        );
    }

    Ok(records)
}

/// Parse CSV text with a header row into records, preserving row order.
///
/// Every non-timestamp cell is kept as text; numeric interpretation happens during extraction.
/// A payload with no content at all yields zero records. Short rows leave their trailing fields
/// absent and surplus cells are ignored.
pub fn parse_csv_records(raw: &str) -> Result<Vec<RawRecord>, ParseError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(raw.as_bytes());

    let headers = reader.headers()?.clone();
    let timestamp_idx = headers
        .iter()
        .position(|h| h == CSV_TIMESTAMP_COLUMN)
        .ok_or(ParseError::MissingColumn {
            column: CSV_TIMESTAMP_COLUMN,
        })?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut timestamp = String::new();
        let mut fields = HashMap::with_capacity(headers.len().saturating_sub(1));

        for (idx, (name, cell)) in headers.iter().zip(row.iter()).enumerate() {
            if idx == timestamp_idx {
                timestamp = cell.to_string();
            } else {
                fields.insert(name.to_string(), RawValue::Text(cell.to_string()));
            }
        }

        records.push(RawRecord::new(timestamp, fields));
    }

    Ok(records)
}
