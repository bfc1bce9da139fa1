//! Vehicle source trait and the Trapeze HTTP implementation.
//!
//! The [`VehicleSource`] trait is the only thing the fetch coordinator knows
//! about upstream. [`TrapezeClient`] implements it against the vehicle info
//! endpoint of a Trapeze geoservice dispatcher via `reqwest`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::error::SourceError;
use super::types::{PositionMode, VehicleLocationList};
use crate::time::Timestamp;

/// Default HTTP timeout for a vehicle location request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the vehicle location endpoint, relative to the service base URL.
const VEHICLES_PATH: &str = "/internetservice/geoserviceDispatcher/services/vehicleinfo/vehicles";

/// Remote source of vehicle locations.
///
/// `since` is the incremental cursor: upstream may omit vehicles that did not
/// change after it. A value of 0 requests a full snapshot.
pub trait VehicleSource: Send + Sync {
    /// Fetch the vehicle locations known upstream.
    fn get_vehicle_locations(
        &self,
        mode: PositionMode,
        since: Timestamp,
    ) -> impl Future<Output = Result<VehicleLocationList, SourceError>> + Send;
}

impl<S: VehicleSource> VehicleSource for Arc<S> {
    fn get_vehicle_locations(
        &self,
        mode: PositionMode,
        since: Timestamp,
    ) -> impl Future<Output = Result<VehicleLocationList, SourceError>> + Send {
        (**self).get_vehicle_locations(mode, since)
    }
}

/// HTTP client for a Trapeze geoservice dispatcher.
///
/// Uses a reusable `reqwest::Client` with connection pooling. The request
/// timeout is the only bound on how long a refresh may stay in flight.
pub struct TrapezeClient {
    /// Reusable HTTP client with connection pooling.
    http: reqwest::Client,

    /// Service base URL without trailing slash.
    base_url: String,
}

impl TrapezeClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::ClientBuild(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL for a mode and cursor.
    fn vehicles_url(&self, mode: PositionMode, since: Timestamp) -> String {
        let mut url = format!(
            "{}{}?positionType={}&colorType=ROUTE_BASED",
            self.base_url,
            VEHICLES_PATH,
            mode.as_str()
        );
        if since > 0 {
            url.push_str(&format!("&lastUpdate={}", since));
        }
        url
    }
}

impl VehicleSource for TrapezeClient {
    async fn get_vehicle_locations(
        &self,
        mode: PositionMode,
        since: Timestamp,
    ) -> Result<VehicleLocationList, SourceError> {
        let url = self.vehicles_url(mode, since);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::HttpError(e.to_string()))?;

        let list = parse_vehicle_list(&bytes)?;

        tracing::debug!(
            url = %url,
            vehicles = list.vehicles.len(),
            last_update = list.last_update,
            "Vehicle locations fetched"
        );

        Ok(list)
    }
}

/// Parse a vehicle location response body.
pub fn parse_vehicle_list(body: &[u8]) -> Result<VehicleLocationList, SourceError> {
    serde_json::from_slice(body).map_err(|e| SourceError::JsonError(e.to_string()))
}
