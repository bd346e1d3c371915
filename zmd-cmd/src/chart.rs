//! The `chart` subcommand.

use anyhow::{bail, Context};
use log::info;

use zmd_chart::selection::SelectionController;
use zmd_data::station_index::StationIndex;
use zmd_meteo::record::Attribute;
use zmd_meteo::station::StationSelector;

use crate::dataset::load_dataset;

/// Compute the series for one selection and emit its chart description as
/// pretty JSON.
pub fn run_chart(
    input: Option<&str>,
    station: &str,
    attribute: &str,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let Some(attribute) = Attribute::from_input(attribute) else {
        bail!("unknown attribute '{attribute}' (expected T, RainDur, or a display label)");
    };
    let batch = load_dataset(input)?;
    let index = StationIndex::from_records(&batch.records);

    let mut controller = SelectionController::new();
    controller.set_station(StationSelector::from_input(station));
    controller.set_attribute(attribute);
    let chart = controller
        .show(&index)
        .context("selection was incomplete")?;

    if chart.data.values.is_empty() {
        info!("series is empty for station '{station}'");
    }

    let json = serde_json::to_string_pretty(chart)?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write chart description '{path}'"))?;
            info!("chart description written to {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}
