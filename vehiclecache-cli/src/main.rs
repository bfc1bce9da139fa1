//! VehicleCache CLI - Command-line interface
//!
//! Queries live transit vehicle positions through the VehicleCache library.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use commands::common::PositionModeArg;
use commands::config::ConfigCommands;
use commands::query::BoundsArgs;
use error::CliError;
use runner::{CliRunner, RunnerOptions};

#[derive(Debug, Parser)]
#[command(name = "vehiclecache")]
#[command(version = vehiclecache::VERSION)]
#[command(about = "Live transit vehicle positions, cached and coalesced", long_about = None)]
struct Cli {
    /// Path to the config file (default: ~/.vehiclecache/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the vehicle location service (overrides config)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Position mode to request (overrides config)
    #[arg(long, global = true, value_enum)]
    mode: Option<PositionModeArg>,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the current state of one vehicle
    Vehicle {
        /// Vehicle id (may be negative)
        #[arg(allow_hyphen_values = true)]
        id: String,
    },

    /// Show the vehicle currently serving a trip
    Trip {
        /// Trip id (may be negative)
        #[arg(allow_hyphen_values = true)]
        id: String,
    },

    /// List vehicles inside a bounding box
    Bounds {
        /// Western edge (longitude)
        #[arg(long, allow_negative_numbers = true)]
        left: f64,
        /// Eastern edge (longitude)
        #[arg(long, allow_negative_numbers = true)]
        right: f64,
        /// Northern edge (latitude)
        #[arg(long, allow_negative_numbers = true)]
        top: f64,
        /// Southern edge (latitude)
        #[arg(long, allow_negative_numbers = true)]
        bottom: f64,
    },

    /// List all current vehicles
    List {
        /// Only vehicles updated at or after this epoch-millisecond timestamp
        #[arg(long, default_value = "0")]
        since: i64,
    },

    /// Refresh repeatedly and print status lines until Ctrl+C
    Watch {
        /// Seconds between refresh attempts
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },

    /// Show or initialize the configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        config,
        url,
        mode,
        verbose,
        command,
    } = cli;

    if let Commands::Config { action } = command {
        return commands::config::run(action, config.as_deref());
    }

    let runner = CliRunner::new(RunnerOptions {
        config_path: config.as_deref(),
        url,
        mode: mode.map(Into::into),
        verbose,
    })?;

    match command {
        Commands::Vehicle { id } => commands::query::run_vehicle(&runner, &id),
        Commands::Trip { id } => commands::query::run_trip(&runner, &id),
        Commands::Bounds {
            left,
            right,
            top,
            bottom,
        } => commands::query::run_bounds(
            &runner,
            BoundsArgs {
                left,
                right,
                top,
                bottom,
            },
        ),
        Commands::List { since } => commands::query::run_list(&runner, since),
        Commands::Watch { interval } => {
            commands::watch::run(&runner, Duration::from_secs(interval))
        }
        Commands::Config { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bounds_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "vehiclecache",
            "bounds",
            "--left",
            "-74.1",
            "--right",
            "-73.9",
            "--top",
            "40.8",
            "--bottom",
            "40.6",
        ])
        .unwrap();

        match cli.command {
            Commands::Bounds { left, right, .. } => {
                assert_eq!(left, -74.1);
                assert_eq!(right, -73.9);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_negative_vehicle_id_with_global_options() {
        let cli = Cli::try_parse_from([
            "vehiclecache",
            "vehicle",
            "-1187843737",
            "--url",
            "https://transit.example.org",
            "--mode",
            "corrected",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("https://transit.example.org"));
        assert_eq!(cli.mode, Some(PositionModeArg::Corrected));
        match cli.command {
            Commands::Vehicle { id } => assert_eq!(id, "-1187843737"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_watch_interval_must_be_positive() {
        assert!(Cli::try_parse_from(["vehiclecache", "watch", "--interval", "0"]).is_err());

        let cli = Cli::try_parse_from(["vehiclecache", "watch"]).unwrap();
        assert!(matches!(cli.command, Commands::Watch { interval: 10 }));
    }

    #[test]
    fn test_config_without_action() {
        let cli = Cli::try_parse_from(["vehiclecache", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { action: None }));
    }
}
