//! Conversion of upstream responses into store records.

use super::types::{RawVehicleLocation, VehicleLocationList};
use crate::time::Timestamp;
use crate::vehicle::VehicleRecord;

/// Convert a response into records ready for merging.
///
/// An entry is admitted if it is present and either marked deleted or
/// carries both coordinates. Every admitted record is stamped with the
/// response's top-level `last_update`.
pub fn convert_response(response: &VehicleLocationList) -> Vec<VehicleRecord> {
    response
        .vehicles
        .iter()
        .flatten()
        .filter(|raw| is_admissible(raw))
        .map(|raw| to_record(raw, response.last_update))
        .collect()
}

fn is_admissible(raw: &RawVehicleLocation) -> bool {
    if raw.is_deleted == Some(true) {
        return true;
    }
    raw.latitude.is_some() && raw.longitude.is_some()
}

fn to_record(raw: &RawVehicleLocation, last_update: Timestamp) -> VehicleRecord {
    VehicleRecord {
        id: raw.id.clone(),
        trip_id: raw.trip_id.clone(),
        latitude: raw.latitude,
        longitude: raw.longitude,
        is_deleted: raw.is_deleted.unwrap_or(false),
        last_update,
        name: raw.name.clone(),
        heading: raw.heading,
        category: raw.category.clone(),
        color: raw.color.clone(),
    }
}
