//! Configuration file settings structs.

use std::path::PathBuf;
use std::time::Duration;

use crate::source::PositionMode;
use crate::storage::StorageConfig;

/// User configuration loaded from `config.ini`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub source: SourceSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

/// `[source]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    /// Base URL of the vehicle location service.
    pub url: Option<String>,
    /// Position mode requested from the service.
    pub position_mode: PositionMode,
    /// HTTP timeout in seconds.
    pub timeout: u64,
}

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Minimum interval between refreshes in milliseconds.
    pub update_delay_ms: u64,
    /// Record time-to-live in milliseconds, 0 disables expiry.
    pub ttl_ms: u64,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl ConfigFile {
    /// Storage configuration derived from the `[source]` and `[cache]` sections.
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig::default()
            .with_update_delay(Duration::from_millis(self.cache.update_delay_ms))
            .with_ttl(Duration::from_millis(self.cache.ttl_ms))
            .with_position_mode(self.source.position_mode)
    }

    /// HTTP timeout for the source client.
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout)
    }
}
