//! Vehicle records and the latest-state entity store.
//!
//! # Components
//!
//! - [`record`] - `VehicleRecord` and the id aliases
//! - [`bounds`] - `GeoBounds` validated bounding boxes
//! - [`store`] - `VehicleStore` merge-by-recency, TTL expiry and queries

mod bounds;
mod record;
mod store;

pub use bounds::GeoBounds;
pub use record::{TripId, VehicleId, VehicleRecord};
pub use store::{MergeResult, VehicleStore};
