use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use daystrip_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "daystrip")]
#[command(author, version, about = "A horizontally scrolling date picker for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of ~/.config/daystrip/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive strip
    Run,
    /// Replay a burst of moves headlessly and print each frame
    Simulate {
        /// Moves applied before the first frame: r/l step, R/L fling
        moves: String,
        /// Stop after this many frames even if still scrolling
        #[arg(short = 'n', long, default_value_t = 600)]
        frames: usize,
        /// Print one JSON object per frame
        #[arg(long)]
        json: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = Arc::new(
        AppConfig::load_from(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?,
    );

    // The terminal UI owns the screen, so it logs to a file
    let log_to_file = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, log_to_file)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config),
        Some(Commands::Simulate {
            moves,
            frames,
            json,
        }) => commands::simulate::run(&config, &moves, frames, json),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Show => commands::config::show(&config),
        },
    }
}

/// Initialize logging; RUST_LOG wins over the configured level
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::try_parse_from(["daystrip", "simulate", "rrL", "--frames", "10", "--json"])
            .unwrap();
        match cli.command {
            Some(Commands::Simulate { moves, frames, json }) => {
                assert_eq!(moves, "rrL");
                assert_eq!(frames, 10);
                assert!(json);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_default_command_is_run() {
        let cli = Cli::try_parse_from(["daystrip"]).unwrap();
        assert!(cli.command.is_none());
    }
}
