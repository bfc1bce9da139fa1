//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, runtime and storage
//! creation to reduce duplication across command handlers.

use std::future::Future;
use std::path::Path;

use tokio::runtime::Runtime;
use tracing::info;
use vehiclecache::config::ConfigFile;
use vehiclecache::logging::{init_logging, LoggingGuard};
use vehiclecache::{PositionMode, TrapezeClient, VehicleStorage};

use crate::commands::common::resolve_base_url;
use crate::error::CliError;

/// Global options shared by every query command.
pub struct RunnerOptions<'a> {
    pub config_path: Option<&'a Path>,
    pub url: Option<String>,
    pub mode: Option<PositionMode>,
    pub verbose: bool,
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    _logging_guard: LoggingGuard,
    config: ConfigFile,
    runtime: Runtime,
    storage: VehicleStorage<TrapezeClient>,
}

impl CliRunner {
    /// Load config, initialize logging and build the vehicle storage.
    pub fn new(options: RunnerOptions<'_>) -> Result<Self, CliError> {
        let config = load_config(options.config_path)?;

        let logging_guard = init_logging(
            &config.logging.directory,
            &config.logging.file,
            options.verbose,
        )
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let base_url = resolve_base_url(options.url, &config)?;
        let client = TrapezeClient::new(base_url.as_str(),config.source_timeout())
            .map_err(CliError::ClientCreation)?;

        let mut storage_config = config.storage_config();
        if let Some(mode) = options.mode {
            storage_config = storage_config.with_position_mode(mode);
        }

        info!(
            url = %base_url,
            mode = %storage_config.position_mode,
            update_delay_ms = storage_config.update_delay.as_millis() as u64,
            ttl_ms = storage_config.ttl.as_millis() as u64,
            "Vehicle cache configured"
        );

        let runtime = Runtime::new().map_err(CliError::Runtime)?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
            runtime,
            storage: VehicleStorage::with_config(client, storage_config),
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn storage(&self) -> &VehicleStorage<TrapezeClient> {
        &self.storage
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("VehicleCache v{}", vehiclecache::VERSION);
        info!("VehicleCache CLI: {} command", command);
    }

    /// Drive a future to completion on the runner's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Load the config file from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}
