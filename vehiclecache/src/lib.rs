//! VehicleCache - Live transit vehicle positions behind a freshness-bounded cache
//!
//! This library polls a Trapeze-style vehicle location service, keeps the
//! latest known state of every vehicle in memory, and answers queries by id,
//! by trip and by bounding box. Refreshes are rate-limited by an update delay
//! and coalesced so that concurrent callers share a single remote request.
//!
//! # High-Level API
//!
//! ```ignore
//! use vehiclecache::config::ConfigFile;
//! use vehiclecache::source::TrapezeClient;
//! use vehiclecache::storage::VehicleStorage;
//!
//! let config = ConfigFile::load()?;
//! let client = TrapezeClient::new("https://transit.example.org", config.source_timeout())?;
//! let storage = VehicleStorage::with_config(client, config.storage_config());
//!
//! let vehicle = storage.get_vehicle("-1187843737").await?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod source;
pub mod storage;
pub mod time;
pub mod vehicle;

pub use error::VehicleError;
pub use source::{PositionMode, SourceError, TrapezeClient, VehicleSource};
pub use storage::{LoadStatus, StorageConfig, VehicleSnapshot, VehicleStorage};
pub use vehicle::{GeoBounds, VehicleRecord, VehicleStore};

/// Version of the VehicleCache library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
