//! Loading a dataset from disk or the embedded sample.

use anyhow::Context;
use log::info;

use zmd_meteo::normalize::{normalize_json_batch, normalize_raw_batch, JsonRow, NormalizedBatch};
use zmd_meteo::raw_record::parse_delimited;

/// Load and normalize a dataset from a `.json` or `.csv` file, or from the
/// embedded JSON sample when no path is given.
pub fn load_dataset(input: Option<&str>) -> anyhow::Result<NormalizedBatch> {
    let batch = match input {
        Some(path) => {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read dataset '{path}'"))?;
            if path.ends_with(".csv") {
                let rows = parse_delimited(&body).context("malformed delimited dataset")?;
                normalize_raw_batch(&rows)
            } else {
                let rows: Vec<JsonRow> =
                    serde_json::from_str(&body).context("malformed JSON dataset payload")?;
                normalize_json_batch(&rows)
            }
        }
        None => {
            let rows: Vec<JsonRow> = serde_json::from_str(zmd_meteo::JSON_SAMPLE)
                .context("malformed embedded sample")?;
            normalize_json_batch(&rows)
        }
    };
    info!(
        "loaded {} records ({} rows dropped)",
        batch.records.len(),
        batch.dropped
    );
    Ok(batch)
}
