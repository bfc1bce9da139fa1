//! Vehicle observation records.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Opaque vehicle identity, unique per vehicle.
pub type VehicleId = String;

/// Opaque trip identity. Several observations may share one.
pub type TripId = String;

/// One observation of a vehicle, stamped with the time upstream produced it.
///
/// Records are only ever created from upstream responses (see
/// [`convert_response`](crate::source::convert_response)). A record with
/// `is_deleted` set is a tombstone: it may lack coordinates but is otherwise
/// stored, ordered and expired like any other record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Vehicle identity (store key).
    pub id: VehicleId,

    /// Trip the vehicle currently serves.
    pub trip_id: Option<TripId>,

    /// Latitude, absent only for tombstones.
    pub latitude: Option<f64>,

    /// Longitude, absent only for tombstones.
    pub longitude: Option<f64>,

    /// Upstream removal signal.
    #[serde(default)]
    pub is_deleted: bool,

    /// When upstream produced this observation. Sole ordering key.
    pub last_update: Timestamp,

    /// Display name, e.g. line and destination.
    pub name: Option<String>,

    /// Heading in degrees.
    pub heading: Option<f64>,

    /// Vehicle category (bus, tram, ...).
    pub category: Option<String>,

    /// Route color.
    pub color: Option<String>,
}

impl VehicleRecord {
    /// Create a positioned record with no optional metadata.
    pub fn new(
        id: impl Into<VehicleId>,
        latitude: f64,
        longitude: f64,
        last_update: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            trip_id: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
            is_deleted: false,
            last_update,
            name: None,
            heading: None,
            category: None,
            color: None,
        }
    }

    /// Create a tombstone for `id`.
    pub fn tombstone(id: impl Into<VehicleId>, last_update: Timestamp) -> Self {
        Self {
            id: id.into(),
            trip_id: None,
            latitude: None,
            longitude: None,
            is_deleted: true,
            last_update,
            name: None,
            heading: None,
            category: None,
            color: None,
        }
    }

    /// Set the trip this vehicle serves.
    pub fn with_trip(mut self, trip_id: impl Into<TripId>) -> Self {
        self.trip_id = Some(trip_id.into());
        self
    }

    /// Both coordinates, if present.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}
