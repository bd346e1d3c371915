//! Command implementations for the Zürich meteo CLI.
//!
//! Provides subcommands for listing stations, emitting chart descriptions
//! and fetching the published JSON dataset.

use clap::Subcommand;

pub mod chart;
pub mod dataset;
pub mod fetch;
pub mod stations;

#[derive(Subcommand)]
pub enum Command {
    /// List the canonical station names in a dataset
    Stations {
        /// Dataset path (.json or .csv); the embedded sample when omitted
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Emit the chart description for a station/attribute selection
    Chart {
        /// Dataset path (.json or .csv); the embedded sample when omitted
        #[arg(short, long)]
        input: Option<String>,

        /// Station name, bare or prefixed, or "Alle Strassen"/"all"
        #[arg(short, long)]
        station: String,

        /// Measured attribute, by field key (T, RainDur) or display label
        #[arg(short, long)]
        attribute: String,

        /// Write the chart description here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Fetch the JSON dataset over HTTP and normalize it
    Fetch {
        /// Dataset URL
        #[arg(short, long)]
        url: String,

        /// Write the canonical records as CSV
        #[arg(short, long)]
        output: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Stations { input } => stations::run_stations(input.as_deref()),
        Command::Chart {
            input,
            station,
            attribute,
            output,
        } => chart::run_chart(input.as_deref(), &station, &attribute, output.as_deref()),
        Command::Fetch { url, output } => fetch::run_fetch(&url, output.as_deref()).await,
    }
}
