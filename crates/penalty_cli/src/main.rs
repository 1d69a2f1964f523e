//! Penalty CLI
//!
//! Replays a named event log from a dataset file and prints the
//! reconstructed penalty tables.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use penalty_core::engine::order_events;
use penalty_core::io::{dataset_names, load_dataset};
use penalty_core::{Rink, Timekeeper, TimekeepingConfig, TimekeepingResponse, SCHEMA_VERSION};
use penalty_cli::{load_config, render_event_table, render_penalty_table, render_strength};

#[derive(Parser)]
#[command(name = "penalty_cli")]
#[command(about = "Reconstruct floorball penalty bay times from event logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the datasets of a dataset file
    List {
        /// Dataset JSON file path
        #[arg(long)]
        file: PathBuf,
    },

    /// Run one dataset through the timekeeper
    Run {
        /// Dataset JSON file path
        #[arg(long)]
        file: PathBuf,

        /// Dataset name
        #[arg(long)]
        dataset: String,

        /// Print the JSON response instead of tables
        #[arg(long, default_value = "false")]
        json: bool,

        /// Timekeeping config JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Court size used for the strength timeline
        #[arg(long, value_enum)]
        rink: Option<RinkArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RinkArg {
    Large,
    Small,
}

impl From<RinkArg> for Rink {
    fn from(arg: RinkArg) -> Self {
        match arg {
            RinkArg::Large => Rink::Large,
            RinkArg::Small => Rink::Small,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List { file } => {
            let names = dataset_names(&file)
                .with_context(|| format!("Failed to load datasets: {}", file.display()))?;
            for name in names {
                println!("{name}");
            }
        }

        Commands::Run {
            file,
            dataset,
            json,
            config,
            rink,
        } => {
            let mut config = match (config, rink) {
                (Some(path), _) => load_config(&path)?,
                (None, Some(RinkArg::Small)) => TimekeepingConfig::small_court(),
                (None, _) => TimekeepingConfig::floorball(),
            };
            if let Some(rink) = rink {
                config.rink = rink.into();
            }

            let records = load_dataset(&file, &dataset).with_context(|| {
                format!("Failed to load dataset '{}' from {}", dataset, file.display())
            })?;
            log::info!("running dataset '{}' ({} events)", dataset, records.len());

            let events = order_events(&records)
                .with_context(|| format!("Event log of dataset '{dataset}' rejected"))?;

            let mut keeper = Timekeeper::new(config.clone());
            keeper
                .ingest_events(&events)
                .with_context(|| format!("Timekeeping failed for dataset '{dataset}'"))?;
            let report = keeper.finalize();

            if json {
                let response = TimekeepingResponse {
                    schema_version: SCHEMA_VERSION,
                    teams: report.teams,
                };
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }

            println!("{}", render_event_table(&events)?);
            for ledger in &report.teams {
                println!("{}", render_penalty_table(ledger, config.exclusion_id_offset)?);
            }
            for ledger in &report.teams {
                println!("{}", render_strength(ledger, config.rink)?);
            }
        }
    }

    Ok(())
}
