//! Core types and ingestion primitives for the Zürich `meteodaten_2023_daily`
//! dataset: raw delimited-text parsing, station identity, the canonical
//! record model, and normalization from both source forms.

pub mod error;
pub mod normalize;
pub mod raw_record;
pub mod record;
pub mod station;

/// Embedded sample of the dataset in its JSON source form.
pub static JSON_SAMPLE: &str = include_str!("../../fixtures/meteodaten_sample.json");

/// Embedded sample of the dataset in its delimited-text source form.
pub static CSV_SAMPLE: &str = include_str!("../../fixtures/meteodaten_sample.csv");
