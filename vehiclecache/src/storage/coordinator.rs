//! Fetch coordinator: single-flight refreshes over the entity store.
//!
//! # States
//!
//! ```text
//!            update required, gate free
//!   Idle ───────────────────────────────► Fetching
//!    ▲                                        │
//!    └──────── status recorded, gate released ┘
//! ```
//!
//! Callers arriving while `Fetching` subscribe to the gate and receive the
//! status of the in-flight refresh instead of starting a second one.
//!
//! # Locking
//!
//! The store and the status live behind `parking_lot` locks that are never
//! held across an `.await`. The store is only written by the gate holder, so
//! merges never interleave and readers see either the old or the new state.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use super::config::StorageConfig;
use super::gate::{FetchGate, GateGuard, GateTicket};
use super::stats::FetchStats;
use super::status::{ErrorStatus, LoadStatus, SuccessStatus};
use crate::error::VehicleError;
use crate::source::{PositionMode, VehicleSource};
use crate::time::{duration_millis, now_millis, Timestamp};
use crate::vehicle::{GeoBounds, VehicleRecord, VehicleStore};

/// Vehicles in a bounding box together with the watermark they reflect.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSnapshot {
    /// `last_update` of the successful refresh the query ran after.
    pub last_update: Timestamp,
    pub vehicles: Vec<VehicleRecord>,
}

/// Freshness-bounded vehicle cache backed by a remote source.
///
/// Every query first makes sure a refresh happened within `update_delay`,
/// refreshing through the source if not. At most one refresh is in flight
/// at any time; concurrent callers share its outcome.
pub struct VehicleStorage<S: VehicleSource> {
    source: S,
    store: RwLock<VehicleStore>,
    status: RwLock<Option<Arc<LoadStatus>>>,
    gate: FetchGate,
    stats: Mutex<FetchStats>,
    config: StorageConfig,
}

impl<S: VehicleSource> VehicleStorage<S> {
    /// Create a storage with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, StorageConfig::default())
    }

    /// Create a storage with custom configuration.
    pub fn with_config(source: S, config: StorageConfig) -> Self {
        Self {
            source,
            store: RwLock::new(VehicleStore::new(config.ttl)),
            status: RwLock::new(None),
            gate: FetchGate::new(),
            stats: Mutex::new(FetchStats::default()),
            config,
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Read access to the underlying store.
    ///
    /// Does not refresh; meant for callers that already hold a fresh status.
    /// Do not hold the guard across an `.await`.
    pub fn store(&self) -> RwLockReadGuard<'_, VehicleStore> {
        self.store.read()
    }

    /// The last recorded status, if any refresh has settled yet.
    pub fn status(&self) -> Option<Arc<LoadStatus>> {
        self.status.read().clone()
    }

    /// Returns true while a refresh is in flight.
    pub fn is_fetching(&self) -> bool {
        self.gate.is_locked()
    }

    /// Returns true if no status was recorded yet or the last one is older
    /// than `update_delay`.
    pub fn update_required(&self) -> bool {
        self.fresh_status().is_none()
    }

    /// Refresh if required, using the configured position mode.
    pub async fn fetch(&self) -> Arc<LoadStatus> {
        self.fetch_with_mode(self.config.position_mode).await
    }

    /// Refresh if required.
    ///
    /// Returns the current status without contacting the source when it is
    /// still fresh. If a refresh is already in flight, waits for it and
    /// returns its status. Otherwise performs the refresh itself.
    pub async fn fetch_with_mode(&self, mode: PositionMode) -> Arc<LoadStatus> {
        self.stats.lock().total_requests += 1;

        loop {
            if let Some(status) = self.fresh_status() {
                return status;
            }

            match self.gate.acquire() {
                GateTicket::Leader(guard) => {
                    // Another leader may have finished between the check and the acquire.
                    if let Some(status) = self.fresh_status() {
                        guard.release(Arc::clone(&status));
                        return status;
                    }
                    return self.refresh(mode, guard).await;
                }
                GateTicket::Waiter(mut rx) => {
                    self.stats.lock().coalesced_requests += 1;
                    debug!("Refresh in flight - waiting for its outcome");

                    match rx.recv().await {
                        Ok(status) => return status,
                        Err(RecvError::Closed) | Err(RecvError::Lagged(_)) => {
                            debug!("In-flight refresh abandoned - retrying");
                        }
                    }
                }
            }
        }
    }

    /// Refresh and fail with the recorded cause if the outcome is an error.
    pub async fn fetch_success_or_fail(&self) -> Result<SuccessStatus, VehicleError> {
        match &*self.fetch().await {
            LoadStatus::Success(success) => Ok(*success),
            LoadStatus::Error(error) => Err(VehicleError::Remote(Arc::clone(&error.error))),
        }
    }

    /// Current record of a vehicle.
    pub async fn get_vehicle(&self, id: &str) -> Result<VehicleRecord, VehicleError> {
        self.fetch_success_or_fail().await?;
        self.store
            .read()
            .get_by_id(id)
            .cloned()
            .ok_or_else(|| VehicleError::vehicle_not_found(id))
    }

    /// Current record of a vehicle serving `trip_id`.
    ///
    /// If several vehicles report the trip, any one of them is returned.
    pub async fn get_vehicle_by_trip_id(
        &self,
        trip_id: &str,
    ) -> Result<VehicleRecord, VehicleError> {
        self.fetch_success_or_fail().await?;
        self.store
            .read()
            .get_by_trip_id(trip_id)
            .cloned()
            .ok_or_else(|| VehicleError::trip_not_found(trip_id))
    }

    /// All current records with `last_update >= since`.
    pub async fn get_all_vehicles(
        &self,
        since: Timestamp,
    ) -> Result<Vec<VehicleRecord>, VehicleError> {
        self.fetch_success_or_fail().await?;
        Ok(self.store.read().get_all(since))
    }

    /// Current records inside a bounding box.
    ///
    /// The box is validated before the source is contacted; an inverted box
    /// fails with [`VehicleError::InvalidArgument`] without a refresh.
    pub async fn get_vehicles_in_bounds(
        &self,
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
    ) -> Result<VehicleSnapshot, VehicleError> {
        let bounds = GeoBounds::new(left, right, top, bottom)?;
        let status = self.fetch_success_or_fail().await?;
        let vehicles = self.store.read().get_within(&bounds, 0);
        Ok(VehicleSnapshot {
            last_update: status.last_update,
            vehicles,
        })
    }

    /// Returns a snapshot of the fetch statistics.
    pub fn stats(&self) -> FetchStats {
        self.stats.lock().clone()
    }

    /// Logs current statistics.
    pub fn log_stats(&self) {
        let stats = self.stats();
        let store = self.store.read();
        info!(
            total_requests = stats.total_requests,
            coalesced = stats.coalesced_requests,
            remote_calls = stats.remote_calls,
            failures = stats.failures,
            vehicles = store.len(),
            watermark = store.last_update(),
            coalescing_ratio = format!("{:.1}%", stats.coalescing_ratio() * 100.0),
            "Vehicle cache statistics"
        );
    }

    /// The recorded status if it is still within `update_delay`.
    fn fresh_status(&self) -> Option<Arc<LoadStatus>> {
        let delay = duration_millis(self.config.update_delay);
        let now = now_millis();
        self.status
            .read()
            .as_ref()
            .filter(|status| status.timestamp().saturating_add(delay) >= now)
            .cloned()
    }

    /// Perform one refresh while holding the gate.
    async fn refresh(&self, mode: PositionMode, guard: GateGuard<'_>) -> Arc<LoadStatus> {
        let since = self.store.read().last_update();
        self.stats.lock().remote_calls += 1;

        debug!(mode = %mode, since, "Refreshing vehicle locations");

        let status = match self.source.get_vehicle_locations(mode, since).await {
            Ok(response) => {
                let merge = self.store.write().add_response(&response);
                info!(
                    last_update = response.last_update,
                    received = response.vehicles.len(),
                    inserted = merge.inserted,
                    expired = merge.expired,
                    retained = merge.retained,
                    "Vehicle locations refreshed"
                );
                LoadStatus::Success(SuccessStatus {
                    last_update: response.last_update,
                    timestamp: now_millis(),
                })
            }
            Err(error) => {
                self.stats.lock().failures += 1;
                warn!(error = %error, since, "Failed to refresh vehicle locations");
                LoadStatus::Error(ErrorStatus {
                    error: Arc::new(error),
                    last_update: since,
                    timestamp: now_millis(),
                })
            }
        };

        let status = Arc::new(status);
        *self.status.write() = Some(Arc::clone(&status));

        let waiters = guard.release(Arc::clone(&status));
        if waiters > 0 {
            debug!(waiters, "Broadcast refresh outcome to coalesced waiters");
        }

        status
    }
}
