//! Fetch coordination over the vehicle store.
//!
//! [`VehicleStorage`] decides when a refresh from the remote source is due,
//! makes sure only one refresh runs at a time through a [`FetchGate`], and
//! answers queries from the store once a successful refresh is on record.
//!
//! # Usage
//!
//! ```ignore
//! use vehiclecache::source::{TrapezeClient, DEFAULT_HTTP_TIMEOUT};
//! use vehiclecache::storage::{StorageConfig, VehicleStorage};
//!
//! let client = TrapezeClient::new("https://transit.example.org", DEFAULT_HTTP_TIMEOUT)?;
//! let storage = VehicleStorage::with_config(client, StorageConfig::default());
//!
//! let vehicle = storage.get_vehicle("-1187843737").await?;
//! let snapshot = storage.get_vehicles_in_bounds(13.6, 13.9, 51.1, 51.0).await?;
//! ```

mod config;
mod coordinator;
mod gate;
mod stats;
mod status;

pub use config::{StorageConfig, DEFAULT_TTL, DEFAULT_UPDATE_DELAY};
pub use coordinator::{VehicleSnapshot, VehicleStorage};
pub use gate::{FetchGate, GateGuard, GateTicket};
pub use stats::FetchStats;
pub use status::{ErrorStatus, LoadStatus, SuccessStatus};
