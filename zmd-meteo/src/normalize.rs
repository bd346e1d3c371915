//! Normalization of raw source rows into canonical records.
//!
//! Both source forms (delimited text and the pre-shaped JSON array) expose
//! the same field names: `Datum`, `Standort`, and one column per measured
//! attribute. They funnel through the same date, station and measurement
//! coercions here, so the two forms cannot drift apart.

use chrono::{DateTime, NaiveDate};
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::MalformedRecord;
use crate::raw_record::RawRecord;
use crate::record::{Attribute, CanonicalRecord};
use crate::station::StationId;

/// Field carrying the observation day in both source forms.
pub const DATE_FIELD: &str = "Datum";

/// Field carrying the (possibly prefixed) station key in both source forms.
pub const STATION_FIELD: &str = "Standort";

/// Date format of the canonical form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Epoch values at or above this magnitude are milliseconds, below it seconds.
const EPOCH_MILLIS_CUTOFF: i64 = 100_000_000_000;

/// One row of the pre-shaped JSON source form.
///
/// `Datum` arrives as an epoch number in the published dataset but is kept
/// as a raw JSON value so string-dated payloads normalize the same way, and
/// measurement fields tolerate numbers, numeric strings and null.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRow {
    #[serde(rename = "Datum")]
    pub datum: Option<Value>,
    #[serde(rename = "Standort")]
    pub standort: Option<String>,
    #[serde(rename = "T")]
    pub temperature: Option<Value>,
    #[serde(rename = "RainDur")]
    pub rain_duration: Option<Value>,
}

impl JsonRow {
    fn measurement(&self, attribute: Attribute) -> Option<&Value> {
        match attribute {
            Attribute::Temperature => self.temperature.as_ref(),
            Attribute::RainDuration => self.rain_duration.as_ref(),
        }
    }
}

/// A normalized ingestion batch: the canonical records plus the number of
/// source rows dropped as malformed.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub records: Vec<CanonicalRecord>,
    pub dropped: usize,
}

/// Normalize any accepted date representation to a calendar date.
///
/// Accepts a Unix epoch (seconds or milliseconds), an ISO date-time string,
/// or an already-normalized `YYYY-MM-DD` string. The calendar day is taken
/// as written (epochs resolve in UTC, matching the producer), so
/// normalizing an already-normalized date yields the identical value.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, MalformedRecord> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MalformedRecord::MissingDate(DATE_FIELD));
    }
    if let Ok(epoch) = raw.parse::<i64>() {
        return date_from_epoch(epoch)
            .ok_or_else(|| MalformedRecord::UnparseableDate(raw.to_string()));
    }
    // ISO date-time or plain date: the leading YYYY-MM-DD is the calendar
    // day as written, independent of any time-of-day or offset suffix.
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, DATE_FORMAT)
        .map_err(|_| MalformedRecord::UnparseableDate(raw.to_string()))
}

fn date_from_epoch(epoch: i64) -> Option<NaiveDate> {
    let seconds = if epoch.abs() >= EPOCH_MILLIS_CUTOFF {
        epoch / 1000
    } else {
        epoch
    };
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}

fn normalize_date_value(value: Option<&Value>) -> Result<NaiveDate, MalformedRecord> {
    match value {
        None | Some(Value::Null) => Err(MalformedRecord::MissingDate(DATE_FIELD)),
        Some(Value::Number(n)) => {
            let epoch = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| MalformedRecord::UnparseableDate(n.to_string()))?;
            date_from_epoch(epoch).ok_or_else(|| MalformedRecord::UnparseableDate(n.to_string()))
        }
        Some(Value::String(s)) => normalize_date(s),
        Some(other) => Err(MalformedRecord::UnparseableDate(other.to_string())),
    }
}

fn normalize_station(raw: Option<&str>) -> Result<StationId, MalformedRecord> {
    match raw.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(StationId::from_raw(key)),
        _ => Err(MalformedRecord::MissingStation(STATION_FIELD)),
    }
}

/// Numeric coercion for measurement fields: missing, blank or non-numeric
/// values become `None`, never zero or NaN.
fn numeric_str(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn numeric_value(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => numeric_str(Some(s)),
        _ => None,
    }
}

/// Normalize one parsed delimited-text row.
pub fn normalize_raw(record: &RawRecord) -> Result<CanonicalRecord, MalformedRecord> {
    let date = match record.get(DATE_FIELD) {
        Some(raw) => normalize_date(raw)?,
        None => return Err(MalformedRecord::MissingDate(DATE_FIELD)),
    };
    let station = normalize_station(record.get(STATION_FIELD))?;
    let measurements: BTreeMap<Attribute, Option<f64>> = Attribute::ALL
        .into_iter()
        .map(|attr| (attr, numeric_str(record.get(attr.key()))))
        .collect();
    Ok(CanonicalRecord {
        station,
        date,
        measurements,
    })
}

/// Normalize one row of the pre-shaped JSON form.
pub fn normalize_json(row: &JsonRow) -> Result<CanonicalRecord, MalformedRecord> {
    let date = normalize_date_value(row.datum.as_ref())?;
    let station = normalize_station(row.standort.as_deref())?;
    let measurements: BTreeMap<Attribute, Option<f64>> = Attribute::ALL
        .into_iter()
        .map(|attr| (attr, numeric_value(row.measurement(attr))))
        .collect();
    Ok(CanonicalRecord {
        station,
        date,
        measurements,
    })
}

/// Normalize every delimited-text row, dropping malformed ones.
pub fn normalize_raw_batch(rows: &[RawRecord]) -> NormalizedBatch {
    collect_batch(rows.iter().map(normalize_raw))
}

/// Normalize every JSON row, dropping malformed ones.
pub fn normalize_json_batch(rows: &[JsonRow]) -> NormalizedBatch {
    collect_batch(rows.iter().map(normalize_json))
}

/// Drops are reported once in aggregate, not per row.
fn collect_batch(
    results: impl Iterator<Item = Result<CanonicalRecord, MalformedRecord>>,
) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for result in results {
        match result {
            Ok(record) => batch.records.push(record),
            Err(_) => batch.dropped += 1,
        }
    }
    if batch.dropped > 0 {
        warn!(
            "dropped {} malformed rows during normalization",
            batch.dropped
        );
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_record::parse_delimited;
    use crate::record::Attribute;

    #[test]
    fn test_normalize_date_is_idempotent() {
        let once = normalize_date("2023-01-01").unwrap();
        let rendered = once.format(DATE_FORMAT).to_string();
        assert_eq!(rendered, "2023-01-01");
        assert_eq!(normalize_date(&rendered).unwrap(), once);
    }

    #[test]
    fn test_normalize_date_from_epoch_millis() {
        // 2023-01-01T00:00:00Z
        let date = normalize_date("1672531200000").unwrap();
        assert_eq!(date.format(DATE_FORMAT).to_string(), "2023-01-01");
    }

    #[test]
    fn test_normalize_date_from_epoch_seconds() {
        let date = normalize_date("1672531200").unwrap();
        assert_eq!(date.format(DATE_FORMAT).to_string(), "2023-01-01");
    }

    #[test]
    fn test_normalize_date_keeps_the_written_calendar_day() {
        // An offset suffix must not shift the day.
        let date = normalize_date("2023-07-04T23:30:00+02:00").unwrap();
        assert_eq!(date.format(DATE_FORMAT).to_string(), "2023-07-04");
    }

    #[test]
    fn test_unparseable_dates_are_rejected() {
        assert_eq!(
            normalize_date(""),
            Err(MalformedRecord::MissingDate(DATE_FIELD))
        );
        assert!(matches!(
            normalize_date("yesterday"),
            Err(MalformedRecord::UnparseableDate(_))
        ));
    }

    #[test]
    fn test_normalize_raw_worked_example() {
        let rows = parse_delimited(
            "Datum,Standort,T,RainDur\n2023-01-01,Zch_Rosengartenstrasse,5.2,0\n",
        )
        .unwrap();
        let record = normalize_raw(&rows[0]).unwrap();
        assert_eq!(record.station.name(), "Rosengartenstrasse");
        assert_eq!(record.date.format(DATE_FORMAT).to_string(), "2023-01-01");
        assert_eq!(record.value(Attribute::Temperature), Some(5.2));
        assert_eq!(record.value(Attribute::RainDuration), Some(0.0));
    }

    #[test]
    fn test_missing_and_non_numeric_measurements_become_none() {
        let rows = parse_delimited(
            "Datum,Standort,T,RainDur\n2023-01-01,Zch_Schimmelstrasse,n/a\n",
        )
        .unwrap();
        let record = normalize_raw(&rows[0]).unwrap();
        assert_eq!(record.value(Attribute::Temperature), None);
        assert_eq!(record.value(Attribute::RainDuration), None);
    }

    #[test]
    fn test_json_rows_normalize_like_raw_rows() {
        let rows: Vec<JsonRow> = serde_json::from_str(
            r#"[{"Datum": 1672531200000, "Standort": "Zch_Rosengartenstrasse", "T": 5.2, "RainDur": 0}]"#,
        )
        .unwrap();
        let record = normalize_json(&rows[0]).unwrap();
        assert_eq!(record.station.name(), "Rosengartenstrasse");
        assert_eq!(record.date.format(DATE_FORMAT).to_string(), "2023-01-01");
        assert_eq!(record.value(Attribute::Temperature), Some(5.2));
    }

    #[test]
    fn test_json_null_measurement_stays_null() {
        let rows: Vec<JsonRow> = serde_json::from_str(
            r#"[{"Datum": "2023-01-06", "Standort": "Zch_Schimmelstrasse", "T": null, "RainDur": 50}]"#,
        )
        .unwrap();
        let record = normalize_json(&rows[0]).unwrap();
        assert_eq!(record.value(Attribute::Temperature), None);
        assert_eq!(record.value(Attribute::RainDuration), Some(50.0));
    }

    #[test]
    fn test_batch_drops_malformed_rows_and_counts_them() {
        let rows = parse_delimited(
            "Datum,Standort,T,RainDur\n\
             2023-01-01,Zch_Rosengartenstrasse,5.2,0\n\
             not-a-date,Zch_Rosengartenstrasse,5.0,0\n\
             2023-01-02,Zch_Rosengartenstrasse,4.8,10\n",
        )
        .unwrap();
        let batch = normalize_raw_batch(&rows);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.dropped, 1);
    }

    #[test]
    fn test_embedded_samples_normalize_cleanly() {
        let rows: Vec<JsonRow> = serde_json::from_str(crate::JSON_SAMPLE).unwrap();
        let json_batch = normalize_json_batch(&rows);
        assert_eq!(json_batch.dropped, 0);

        let raw = parse_delimited(crate::CSV_SAMPLE).unwrap();
        let csv_batch = normalize_raw_batch(&raw);
        assert_eq!(csv_batch.dropped, 0);
        assert_eq!(json_batch.records.len(), csv_batch.records.len());
    }
}
