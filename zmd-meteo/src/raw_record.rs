//! Syntactic parsing of the delimited-text source form.

use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;

/// One data line of the delimited source, keyed by header name.
///
/// Values are whitespace-trimmed strings. A data line shorter than the
/// header simply lacks entries for the trailing fields. No field semantics
/// are interpreted here; this is the only place where column-to-position
/// correspondence is established.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord(HashMap<String, String>);

impl RawRecord {
    /// The trimmed value of a field, `None` if the row did not carry it.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

/// Split delimited text (a header line followed by data lines) into raw
/// records.
///
/// The header line establishes the field names; each data line is zipped
/// positionally against it. Empty trailing lines are skipped rather than
/// turned into an all-empty record.
pub fn parse_delimited(text: &str) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        records.push(RawRecord(fields));
    }
    Ok(records)
}
