//! Entity store holding the latest known record per vehicle.
//!
//! The store is a plain owned structure; callers that share it across tasks
//! wrap it in a lock (see [`VehicleStorage`](crate::storage::VehicleStorage)).
//!
//! # Merge rules
//!
//! - One record per vehicle id.
//! - An incoming record replaces the stored one only if its `last_update` is
//!   strictly greater. Ties keep the stored record.
//! - With a non-zero TTL, any candidate with `last_update + ttl < now` is
//!   dropped during the merge, stored records included. An expired incoming
//!   record never displaces a fresh stored one.
//! - The watermark is recomputed after every merge as the maximum
//!   `last_update` over the retained records (0 when empty).

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tracing::debug;

use super::bounds::GeoBounds;
use super::record::VehicleRecord;
use crate::error::VehicleError;
use crate::source::{convert_response, VehicleLocationList};
use crate::time::{duration_millis, now_millis, Timestamp};

/// Counters describing a single merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeResult {
    /// Incoming records written into the store.
    pub inserted: usize,
    /// Incoming records discarded because a stored record was as new or newer.
    pub discarded: usize,
    /// Candidates (stored or incoming) dropped by the TTL check.
    pub expired: usize,
    /// Records retained after the merge.
    pub retained: usize,
}

impl fmt::Display for MergeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "merge: {} inserted, {} discarded, {} expired, {} retained",
            self.inserted, self.discarded, self.expired, self.retained
        )
    }
}

/// Latest-state store keyed by vehicle id.
#[derive(Debug, Clone, Default)]
pub struct VehicleStore {
    records: HashMap<String, VehicleRecord>,
    last_update: Timestamp,
    ttl: Duration,
}

impl VehicleStore {
    /// Create an empty store. A zero `ttl` disables expiry.
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: HashMap::new(),
            last_update: 0,
            ttl,
        }
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Maximum `last_update` over the retained records, 0 if empty.
    pub fn last_update(&self) -> Timestamp {
        self.last_update
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over retained records in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &VehicleRecord> {
        self.records.values()
    }

    /// Adapt a raw upstream response and merge it at the current time.
    pub fn add_response(&mut self, response: &VehicleLocationList) -> MergeResult {
        self.merge(convert_response(response))
    }

    /// Merge records using the current wall-clock time for TTL checks.
    pub fn merge<I>(&mut self, incoming: I) -> MergeResult
    where
        I: IntoIterator<Item = VehicleRecord>,
    {
        self.merge_at(incoming, now_millis())
    }

    /// Merge records, evaluating the TTL check against `now`.
    ///
    /// The stored records are folded first, then the incoming ones, so a
    /// stored record wins every tie.
    pub fn merge_at<I>(&mut self, incoming: I, now: Timestamp) -> MergeResult
    where
        I: IntoIterator<Item = VehicleRecord>,
    {
        let ttl = duration_millis(self.ttl);
        let admit =
            |record: &VehicleRecord| ttl <= 0 || record.last_update.saturating_add(ttl) >= now;

        let existing = std::mem::take(&mut self.records);
        let mut merged: HashMap<String, VehicleRecord> = HashMap::with_capacity(existing.len());
        let mut result = MergeResult::default();

        for record in existing.into_values() {
            if admit(&record) {
                merged.insert(record.id.clone(), record);
            } else {
                result.expired += 1;
            }
        }

        for record in incoming {
            if let Some(current) = merged.get(&record.id) {
                if current.last_update >= record.last_update {
                    result.discarded += 1;
                    continue;
                }
            }
            if admit(&record) {
                merged.insert(record.id.clone(), record);
                result.inserted += 1;
            } else {
                result.expired += 1;
            }
        }

        self.last_update = merged.values().map(|r| r.last_update).max().unwrap_or(0);
        self.records = merged;
        result.retained = self.records.len();

        debug!(
            inserted = result.inserted,
            discarded = result.discarded,
            expired = result.expired,
            retained = result.retained,
            watermark = self.last_update,
            "Merged vehicle records"
        );

        result
    }

    /// Look up the record for a vehicle.
    pub fn get_by_id(&self, id: &str) -> Option<&VehicleRecord> {
        self.records.get(id)
    }

    /// Look up a vehicle serving `trip_id`.
    ///
    /// Trip ids are not unique keys; if several vehicles report the same trip
    /// the first one found in iteration order is returned.
    pub fn get_by_trip_id(&self, trip_id: &str) -> Option<&VehicleRecord> {
        self.records
            .values()
            .find(|r| r.trip_id.as_deref() == Some(trip_id))
    }

    /// All records with `last_update >= since`.
    pub fn get_all(&self, since: Timestamp) -> Vec<VehicleRecord> {
        self.records
            .values()
            .filter(|r| r.last_update >= since)
            .cloned()
            .collect()
    }

    /// Records inside the given box with `last_update >= since`.
    ///
    /// Fails with [`VehicleError::InvalidArgument`] before scanning if
    /// `left >= right` or `top <= bottom`.
    pub fn get_in_bounds(
        &self,
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
        since: Timestamp,
    ) -> Result<Vec<VehicleRecord>, VehicleError> {
        let bounds = GeoBounds::new(left, right, top, bottom)?;
        Ok(self.get_within(&bounds, since))
    }

    /// Records inside an already validated box with `last_update >= since`.
    ///
    /// Records without coordinates (tombstones) never match.
    pub fn get_within(&self, bounds: &GeoBounds, since: Timestamp) -> Vec<VehicleRecord> {
        self.records
            .values()
            .filter(|r| r.last_update >= since)
            .filter(|r| matches!(r.position(), Some((lat, lon)) if bounds.contains(lat, lon)))
            .cloned()
            .collect()
    }
}
