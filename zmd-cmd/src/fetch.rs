//! The `fetch` subcommand: HTTP ingestion of the published JSON dataset.

use std::time::Duration;

use anyhow::Context;
use log::info;
use thiserror::Error;

use zmd_data::session::DatasetSession;
use zmd_meteo::normalize::{normalize_json_batch, JsonRow, DATE_FORMAT};
use zmd_meteo::record::Attribute;

/// Ingestion transport failures: the endpoint was unreachable, refused the
/// request, or returned something that is not the dataset. These abort the
/// whole ingestion; the session keeps an empty set.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("dataset request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("dataset endpoint answered {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed dataset payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// GET the JSON dataset rows from `url`.
pub async fn fetch_rows(client: &reqwest::Client, url: &str) -> Result<Vec<JsonRow>, FetchError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Fetch, normalize and install the dataset into a fresh session,
/// optionally writing the canonical set out as CSV.
pub async fn run_fetch(url: &str, output: Option<&str>) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;

    let mut session = DatasetSession::new();
    let ticket = session.begin_ingest();

    info!("fetching dataset from {url}");
    let rows = fetch_rows(&client, url).await?;
    session.install(ticket, normalize_json_batch(&rows));

    info!(
        "ingested {} records ({} rows dropped)",
        session.records().len(),
        session.dropped_rows()
    );

    if let Some(path) = output {
        let mut lines = vec!["Datum,Standort,T,RainDur".to_string()];
        for record in session.records() {
            lines.push(format!(
                "{},{},{},{}",
                record.date.format(DATE_FORMAT),
                record.station.name(),
                format_value(record.value(Attribute::Temperature)),
                format_value(record.value(Attribute::RainDuration)),
            ));
        }
        lines.push(String::new());
        std::fs::write(path, lines.join("\n"))
            .with_context(|| format!("failed to write canonical records '{path}'"))?;
        info!("canonical records written to {path}");
    }
    Ok(())
}

/// Missing measurements stay empty fields, not zeros.
fn format_value(value: Option<f64>) -> String {
    value.map_or(String::new(), |v| format!("{v}"))
}
