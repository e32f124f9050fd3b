// Series extractor - typed samples for one named field
use crate::domain::record::{RawRecord, RawValue};
use crate::domain::series::{Sample, Series};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse a source timestamp into epoch milliseconds.
///
/// Accepts RFC 3339, ISO-8601 with or without an offset (no offset means UTC) and bare dates
/// (midnight UTC). Returns `None` for anything else.
pub fn parse_instant(timestamp: &str) -> Option<i64> {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.timestamp_millis());
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(timestamp, format) {
            return Some(dt.timestamp_millis());
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Interpret a raw field as a reading.
///
/// Missing, null, empty and unparseable values are all "no reading". Zero is a reading.
pub fn to_finite_number(value: Option<&RawValue>) -> Option<f64> {
    let number = match value? {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Null | RawValue::Bool(_) => return None,
    };
    number.is_finite().then_some(number)
}

/// Build the series for `field_name`, keeping record order and silently dropping records
/// without a valid instant or reading.
pub fn extract_series(records: &[RawRecord], field_name: &str, label: &str) -> Series {
    let points: Vec<Sample> = records
        .iter()
        .filter_map(|record| {
            let x = parse_instant(&record.timestamp)?;
            let y = to_finite_number(record.field(field_name))?;
            Sample::new(x, y)
        })
        .collect();

    let dropped = records.len() - points.len();
    if dropped > 0 {
        tracing::debug!(
            "Dropped {} of {} records without a reading for {}",
            dropped,
            records.len(),
            field_name
        );
    }

    Series::new(label.to_string(), points)
}
