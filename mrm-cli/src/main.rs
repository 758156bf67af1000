//! MRM CLI - validate and inspect the basin map dataset.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "mrm-cli",
    version,
    about = "Mineral rights basin map dataset toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: mrm_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    mrm_cmd::run(cli.command).await
}
