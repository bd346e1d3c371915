//! The `stations` subcommand.

use zmd_data::station_index::StationIndex;
use zmd_meteo::station::ALL_STATIONS_LABEL;

use crate::dataset::load_dataset;

/// Print the canonical station names plus the all-stations choice, in the
/// order selectors should offer them.
pub fn run_stations(input: Option<&str>) -> anyhow::Result<()> {
    let batch = load_dataset(input)?;
    let index = StationIndex::from_records(&batch.records);
    for station in index.stations() {
        println!("{station}");
    }
    println!("{ALL_STATIONS_LABEL}");
    Ok(())
}
