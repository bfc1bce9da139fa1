//! User configuration for VehicleCache.
//!
//! Settings are read from `~/.vehiclecache/config.ini`. A missing file or a
//! missing key falls back to the `DEFAULT_*` constants.
//!
//! # Example
//!
//! ```
//! use vehiclecache::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! let storage = config.storage_config();
//! assert_eq!(storage.update_delay.as_millis(), 10_000);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_LOG_DIR, DEFAULT_LOG_FILE, DEFAULT_SOURCE_TIMEOUT_SECS, DEFAULT_TTL_MS,
    DEFAULT_UPDATE_DELAY_MS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{CacheSettings, ConfigFile, LoggingSettings, SourceSettings};
