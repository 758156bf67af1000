//! Command implementations for the MRM map CLI.
//!
//! Every command reads the dataset either from files given on the command
//! line or, without them, from the fixtures compiled into `mrm-geo`.

use clap::{Args, Subcommand};

pub mod fetch;
pub mod input;
pub mod layers;
pub mod totals;
pub mod validate;

/// Where to read the dataset from.
#[derive(Args, Debug, Clone, Default)]
pub struct DatasetArgs {
    /// Basins JSON document (defaults to the embedded fixtures)
    #[arg(short = 'b', long)]
    pub basins: Option<String>,

    /// Extra project sites as CSV
    #[arg(short = 'p', long)]
    pub projects: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a dataset and report data-quality warnings and totals drift
    Validate {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Print the aggregate totals recomputed from the dataset
    Totals {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dump the map layer plan as Mapbox style JSON
    Layers {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Output path (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Download a dataset document, validate it and save it
    Fetch {
        /// URL of the dataset JSON document
        #[arg(short = 'u', long)]
        url: String,

        /// Output path for the validated document
        #[arg(short = 'o', long)]
        output: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Validate { dataset } => validate::run_validate(&dataset),
        Command::Totals { dataset, json } => totals::run_totals(&dataset, json),
        Command::Layers { dataset, output } => layers::run_layers(&dataset, output.as_deref()),
        Command::Fetch { url, output } => fetch::run_fetch(&url, &output).await,
    }
}
