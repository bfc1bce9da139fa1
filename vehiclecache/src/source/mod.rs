//! Remote vehicle location source.
//!
//! # Architecture
//!
//! ```text
//! VehicleStorage (fetch coordinator)
//!     │
//!     ├── VehicleSource trait → TrapezeClient (direct reqwest)
//!     │
//!     └── convert_response() → Vec<VehicleRecord> → VehicleStore::merge()
//! ```
//!
//! The adapting layer drops entries that cannot be stored (null entries and
//! non-deleted entries missing a coordinate) before they reach the store.

mod adapter;
mod client;
mod error;
mod types;

pub use adapter::convert_response;
pub use client::{parse_vehicle_list, TrapezeClient, VehicleSource, DEFAULT_HTTP_TIMEOUT};
pub use error::SourceError;
pub use types::{PositionMode, RawVehicleLocation, VehicleLocationList};
