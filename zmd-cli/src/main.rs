//! zmd-cli - Command line tool for exploring the Zürich daily meteo dataset.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "zmd-cli",
    version,
    about = "Zürich Meteodaten toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: zmd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    zmd_cmd::run(cli.command).await
}
