//! Configuration CLI commands.
//!
//! `config` prints the effective configuration, `config path` the file
//! location and `config init` writes a default file.

use std::path::Path;

use clap::Subcommand;
use console::style;
use vehiclecache::config::{config_file_path, ConfigFile};

use crate::error::CliError;
use crate::runner::load_config;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (default)
    Show,

    /// Show the configuration file path
    Path,

    /// Write a configuration file with default values if none exists
    Init,
}

/// Run a config subcommand.
pub fn run(command: Option<ConfigCommands>, config_path: Option<&Path>) -> Result<(), CliError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);

    match command.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => run_show(&path, config_path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init => run_init(&path),
    }
}

fn run_show(path: &Path, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    println!("Configuration Settings");
    println!("======================");
    println!();
    if path.exists() {
        println!("File: {}", style(path.display()).cyan());
    } else {
        println!("File: {} (not found, using defaults)", path.display());
    }
    println!();

    for (section, entries) in effective_settings(&config) {
        println!("{}", style(format!("[{}]", section)).bold());
        for (key, value) in entries {
            if value.is_empty() {
                println!("  {:<14} (not set)", key);
            } else {
                println!("  {:<14} {}", key, value);
            }
        }
        println!();
    }

    Ok(())
}

fn run_init(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        println!("Config file already exists: {}", path.display());
        return Ok(());
    }

    ConfigFile::default().save_to(path)?;
    println!("Created {}", style(path.display()).green());
    Ok(())
}

/// An INI section name with its key/value pairs.
type Section = (&'static str, Vec<(&'static str, String)>);

/// Settings grouped by INI section, in file order.
fn effective_settings(config: &ConfigFile) -> Vec<Section> {
    vec![
        (
            "source",
            vec![
                ("url", config.source.url.clone().unwrap_or_default()),
                (
                    "position_mode",
                    config.source.position_mode.as_str().to_lowercase(),
                ),
                ("timeout", format!("{}s", config.source.timeout)),
            ],
        ),
        (
            "cache",
            vec![
                ("update_delay", format!("{}ms", config.cache.update_delay_ms)),
                ("ttl", format!("{}ms", config.cache.ttl_ms)),
            ],
        ),
        (
            "logging",
            vec![
                ("directory", config.logging.directory.display().to_string()),
                ("file", config.logging.file.clone()),
            ],
        ),
    ]
}
