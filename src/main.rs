mod commands;
mod config;
mod download;
mod snapshot;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "shepherd-sync")]
#[command(about = "Turn Shepherd appointment forms into downloadable calendar events")]
struct Cli {
    /// Use this config file instead of ~/.config/shepherd-sync/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the appointment extracted from a saved form as JSON
    Extract {
        /// Saved page (.html) or form fixture (.json)
        snapshot: PathBuf,
    },
    /// Print the .ics document for a saved form
    Ics {
        /// Saved page (.html) or form fixture (.json)
        snapshot: PathBuf,
    },
    /// Write the .ics file for a saved form
    Download {
        /// Saved page (.html) or form fixture (.json)
        snapshot: PathBuf,

        /// Output directory (defaults to output_dir from config)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Ask where to save the file
        #[arg(long)]
        save_as: bool,
    },
    /// Print the .ics document for an event JSON file
    Encode {
        /// Event JSON, as printed by `extract`
        event: PathBuf,
    },
    /// Show configuration, or create a default config file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Config { action: Some(ConfigAction::Init) } => commands::config::init(config_path),
        Commands::Config { action: None } => {
            let config = Config::load(config_path)?;
            commands::config::run(config_path, &config)
        }
        Commands::Extract { snapshot } => {
            let config = Config::load(config_path)?;
            commands::extract::run(&snapshot, &config).await
        }
        Commands::Ics { snapshot } => {
            let config = Config::load(config_path)?;
            commands::ics::run(&snapshot, &config).await
        }
        Commands::Download {
            snapshot,
            out,
            save_as,
        } => {
            let config = Config::load(config_path)?;
            commands::download::run(&snapshot, out, save_as, &config).await
        }
        Commands::Encode { event } => {
            let config = Config::load(config_path)?;
            commands::encode::run(&event, &config).await
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings and up by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
