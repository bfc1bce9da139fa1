//! Wire types of the vehicle location endpoint.
//!
//! Only the fields the cache reads are modelled; everything else in the
//! upstream payload is ignored during deserialization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Which position upstream should report for each vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionMode {
    /// Last position reported by the vehicle.
    #[default]
    Raw,
    /// Position corrected/interpolated along the route.
    Corrected,
}

impl PositionMode {
    /// Query parameter value used by the remote API.
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionMode::Raw => "RAW",
            PositionMode::Corrected => "CORRECTED",
        }
    }
}

impl fmt::Display for PositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(PositionMode::Raw),
            "corrected" => Ok(PositionMode::Corrected),
            other => Err(format!("unknown position mode '{}'", other)),
        }
    }
}

/// One vehicle entry as reported upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVehicleLocation {
    pub id: String,
    #[serde(default)]
    pub trip_id: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_deleted: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Response of the vehicle location endpoint.
///
/// `vehicles` may contain `null` entries; they are skipped when the response
/// is converted into records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLocationList {
    /// Upstream time of this snapshot, used as every record's `last_update`.
    pub last_update: Timestamp,
    #[serde(default)]
    pub vehicles: Vec<Option<RawVehicleLocation>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_mode_default_is_raw() {
        assert_eq!(PositionMode::default(), PositionMode::Raw);
        assert_eq!(PositionMode::Raw.to_string(), "RAW");
        assert_eq!(PositionMode::Corrected.as_str(), "CORRECTED");
    }

    #[test]
    fn test_position_mode_from_str() {
        assert_eq!("raw".parse::<PositionMode>().unwrap(), PositionMode::Raw);
        assert_eq!(
            " CORRECTED ".parse::<PositionMode>().unwrap(),
            PositionMode::Corrected
        );
        assert!("interpolated".parse::<PositionMode>().is_err());
    }

    #[test]
    fn test_location_list_deserialize() {
        let json = r#"{
            "lastUpdate": 1700000000000,
            "vehicles": [
                {
                    "id": "-1187843737",
                    "tripId": "9014398090401187914",
                    "latitude": 195463423,
                    "longitude": 36041292,
                    "isDeleted": false,
                    "name": "62 Wiener Platz",
                    "heading": 270,
                    "category": "bus",
                    "color": "0x000000"
                },
                null,
                {"id": "-42", "isDeleted": true}
            ]
        }"#;

        let list: VehicleLocationList = serde_json::from_str(json).unwrap();
        assert_eq!(list.last_update, 1_700_000_000_000);
        assert_eq!(list.vehicles.len(), 3);
        assert!(list.vehicles[1].is_none());

        let first = list.vehicles[0].as_ref().unwrap();
        assert_eq!(first.trip_id.as_deref(), Some("9014398090401187914"));
        assert_eq!(first.latitude, Some(195463423.0));
        assert_eq!(first.heading, Some(270.0));

        let deleted = list.vehicles[2].as_ref().unwrap();
        assert_eq!(deleted.is_deleted, Some(true));
        assert_eq!(deleted.latitude, None);
    }

    #[test]
    fn test_location_list_ignores_extra_fields() {
        let json = r#"{"lastUpdate": 5, "vehicles": [], "generatedBy": "server-1"}"#;
        let list: VehicleLocationList = serde_json::from_str(json).unwrap();
        assert_eq!(list.last_update, 5);
        assert!(list.vehicles.is_empty());
    }
}
