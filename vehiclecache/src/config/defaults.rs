//! Default values for all configuration settings.

use std::path::PathBuf;

use super::settings::*;
use crate::source::PositionMode;

/// Default HTTP timeout for the source client (seconds).
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 10;

/// Default minimum interval between refreshes (milliseconds).
pub const DEFAULT_UPDATE_DELAY_MS: u64 = 10_000;

/// Default record time-to-live (milliseconds, 0 = no expiry).
pub const DEFAULT_TTL_MS: u64 = 0;

/// Default log directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "vehiclecache.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            source: SourceSettings {
                url: None,
                position_mode: PositionMode::Raw,
                timeout: DEFAULT_SOURCE_TIMEOUT_SECS,
            },
            cache: CacheSettings {
                update_delay_ms: DEFAULT_UPDATE_DELAY_MS,
                ttl_ms: DEFAULT_TTL_MS,
            },
            logging: LoggingSettings {
                directory: PathBuf::from(DEFAULT_LOG_DIR),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
