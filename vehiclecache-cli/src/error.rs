//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use vehiclecache::config::ConfigFileError;
use vehiclecache::{SourceError, VehicleError};

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to load or save the configuration file
    ConfigFile(ConfigFileError),
    /// Failed to create the HTTP client
    ClientCreation(SourceError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// A query against the vehicle cache failed
    Query(VehicleError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Query(VehicleError::Remote(_)) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. The service URL is wrong: check [source] url in config.ini or --url");
                eprintln!("  2. The service is unreachable: check your network connection");
                eprintln!("  3. The service is slow: raise [source] timeout in config.ini");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!(
                    "Run 'vehiclecache config init' to create a config file, then edit it."
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::ClientCreation(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Query(VehicleError::Remote(e)) => {
                write!(f, "Failed to fetch vehicle locations: {}", e)
            }
            CliError::Query(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::ClientCreation(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Query(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<VehicleError> for CliError {
    fn from(e: VehicleError) -> Self {
        CliError::Query(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_not_found_message() {
        let err = CliError::from(VehicleError::NotFound {
            kind: "Vehicle",
            id: "42".to_string(),
        });
        assert_eq!(err.to_string(), "Vehicle not found: 42");
    }

    #[test]
    fn test_remote_message_includes_cause() {
        let err = CliError::from(VehicleError::Remote(Arc::new(SourceError::Status(502))));
        let message = err.to_string();
        assert!(message.starts_with("Failed to fetch vehicle locations"));
        assert!(message.contains("502"));
    }

    #[test]
    fn test_config_file_error_has_source() {
        use std::error::Error;

        let err = CliError::from(ConfigFileError::WriteError("disk full".to_string()));
        assert!(err.source().is_some());
        assert!(CliError::Config("missing url".to_string()).source().is_none());
    }
}
