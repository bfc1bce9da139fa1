//! Integration tests for the fetch coordinator.
//!
//! These tests drive `VehicleStorage` with an in-process source whose calls
//! can be held open, to verify:
//! - Concurrent callers share one remote call and one status
//! - Failures are recorded and shared like successes
//! - Query errors (not found, invalid bounds)
//! - Waiters recover when the refresh they wait on is abandoned
//!
//! Run with: `cargo test --test storage_integration`

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use vehiclecache::source::{RawVehicleLocation, VehicleLocationList};
use vehiclecache::time::{now_millis, Timestamp};
use vehiclecache::{
    PositionMode, SourceError, StorageConfig, VehicleError, VehicleSource, VehicleStorage,
};

// ============================================================================
// Test Source
// ============================================================================

/// Source that counts calls and, while held, blocks each call until released.
#[derive(Default)]
struct GatedSource {
    calls: AtomicUsize,
    held: AtomicBool,
    release: Notify,
    fail_next: AtomicBool,
    last_mode: Mutex<Option<PositionMode>>,
}

impl GatedSource {
    fn held() -> Self {
        let source = Self::default();
        source.held.store(true, Ordering::SeqCst);
        source
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl VehicleSource for GatedSource {
    async fn get_vehicle_locations(
        &self,
        mode: PositionMode,
        _since: Timestamp,
    ) -> Result<VehicleLocationList, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_mode.lock().unwrap() = Some(mode);

        if self.held.load(Ordering::SeqCst) {
            self.release.notified().await;
        }

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(SourceError::Status(503));
        }

        Ok(VehicleLocationList {
            last_update: now_millis(),
            vehicles: vec![
                vehicle("-1187843737", "8142", 51.05, 13.74),
                vehicle("-1187843738", "8143", 51.30, 12.37),
                None,
            ],
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn vehicle(id: &str, trip: &str, lat: f64, lon: f64) -> Option<RawVehicleLocation> {
    Some(RawVehicleLocation {
        id: id.to_string(),
        trip_id: Some(trip.to_string()),
        latitude: Some(lat),
        longitude: Some(lon),
        name: Some(format!("Bus {}", trip)),
        ..Default::default()
    })
}

type SharedStorage = Arc<VehicleStorage<Arc<GatedSource>>>;

fn storage(source: &Arc<GatedSource>, update_delay: Duration) -> SharedStorage {
    Arc::new(VehicleStorage::with_config(
        Arc::clone(source),
        StorageConfig::default().with_update_delay(update_delay),
    ))
}

/// Poll `cond` until it holds, failing the test after a few seconds.
async fn wait_until(mut cond: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

// ============================================================================
// Integration Tests
// ============================================================================

#[tokio::test]
async fn test_concurrent_fetches_share_one_remote_call() {
    let source = Arc::new(GatedSource::held());
    let storage = storage(&source, Duration::from_secs(60));

    let leader = tokio::spawn({
        let storage = Arc::clone(&storage);
        async move { storage.fetch().await }
    });
    wait_until(|| storage.is_fetching()).await;

    let waiter = tokio::spawn({
        let storage = Arc::clone(&storage);
        async move { storage.fetch().await }
    });
    wait_until(|| storage.stats().coalesced_requests == 1).await;

    source.release.notify_one();

    let a = leader.await.unwrap();
    let b = waiter.await.unwrap();

    assert!(a.is_success());
    assert!(Arc::ptr_eq(&a, &b), "both callers observe the same status");
    assert_eq!(source.calls(), 1);
    assert!(!storage.is_fetching());
}

#[tokio::test]
async fn test_many_waiters_woken_once() {
    let source = Arc::new(GatedSource::held());
    let storage = storage(&source, Duration::from_secs(60));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let storage = Arc::clone(&storage);
        handles.push(tokio::spawn(async move { storage.fetch().await }));
    }

    wait_until(|| storage.stats().coalesced_requests == 15).await;
    source.release.notify_one();

    let statuses = futures::future::join_all(handles).await;
    let first = statuses[0].as_ref().unwrap();
    for status in &statuses {
        assert!(Arc::ptr_eq(first, status.as_ref().unwrap()));
    }

    let stats = storage.stats();
    assert_eq!(stats.total_requests, 16);
    assert_eq!(stats.remote_calls, 1);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_shared_failure_then_retry_after_delay() {
    let source = Arc::new(GatedSource::held());
    source.fail_next.store(true, Ordering::SeqCst);
    let storage = storage(&source, Duration::from_millis(200));

    let first = tokio::spawn({
        let storage = Arc::clone(&storage);
        async move { storage.get_vehicle("-1187843737").await }
    });
    wait_until(|| storage.is_fetching()).await;
    let second = tokio::spawn({
        let storage = Arc::clone(&storage);
        async move { storage.get_vehicle("-1187843737").await }
    });
    wait_until(|| storage.stats().coalesced_requests == 1).await;
    source.release.notify_one();

    let cause_a = match first.await.unwrap() {
        Err(VehicleError::Remote(cause)) => cause,
        other => panic!("expected remote failure, got {:?}", other),
    };
    let cause_b = match second.await.unwrap() {
        Err(VehicleError::Remote(cause)) => cause,
        other => panic!("expected remote failure, got {:?}", other),
    };
    assert!(Arc::ptr_eq(&cause_a, &cause_b));
    assert!(matches!(cause_a.as_ref(), SourceError::Status(503)));

    // Within the delay the failure is served without contacting the source.
    assert!(storage.get_vehicle("-1187843737").await.is_err());
    assert_eq!(source.calls(), 1);

    tokio::time::sleep(Duration::from_millis(250)).await;
    source.held.store(false, Ordering::SeqCst);

    let record = storage.get_vehicle("-1187843737").await.unwrap();
    assert_eq!(record.trip_id.as_deref(), Some("8142"));
    assert_eq!(source.calls(), 2);
    assert_eq!(storage.stats().failures, 1);
}

#[tokio::test]
async fn test_not_found_after_successful_fetch() {
    let source = Arc::new(GatedSource::default());
    let storage = storage(&source, Duration::from_secs(60));

    let err = storage.get_vehicle("unknown").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Vehicle not found: unknown");

    let err = storage.get_vehicle_by_trip_id("unknown").await.unwrap_err();
    assert!(err.is_not_found());

    let found = storage.get_vehicle_by_trip_id("8143").await.unwrap();
    assert_eq!(found.id, "-1187843738");
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_invalid_bounds_never_contact_source() {
    let source = Arc::new(GatedSource::default());
    let storage = storage(&source, Duration::from_secs(60));

    let err = storage
        .get_vehicles_in_bounds(13.9, 13.6, 51.1, 51.0)
        .await
        .unwrap_err();
    assert!(matches!(err, VehicleError::InvalidArgument(_)));

    let err = storage
        .get_vehicles_in_bounds(13.6, 13.9, 51.0, 51.1)
        .await
        .unwrap_err();
    assert!(matches!(err, VehicleError::InvalidArgument(_)));

    assert_eq!(source.calls(), 0);
    assert!(storage.status().is_none());
}

#[tokio::test]
async fn test_bounds_query_returns_watermark() {
    let source = Arc::new(GatedSource::default());
    let storage = storage(&source, Duration::from_secs(60));

    let snapshot = storage
        .get_vehicles_in_bounds(13.6, 13.9, 51.1, 51.0)
        .await
        .unwrap();

    assert_eq!(snapshot.vehicles.len(), 1);
    assert_eq!(snapshot.vehicles[0].id, "-1187843737");
    assert_eq!(snapshot.last_update, storage.store().last_update());
}

#[tokio::test]
async fn test_fetch_with_explicit_mode() {
    let source = Arc::new(GatedSource::default());
    let storage = storage(&source, Duration::from_secs(60));

    let status = storage.fetch_with_mode(PositionMode::Corrected).await;

    assert!(status.is_success());
    assert_eq!(
        *source.last_mode.lock().unwrap(),
        Some(PositionMode::Corrected)
    );
}

#[tokio::test]
async fn test_abandoned_leader_lets_waiter_retry() {
    let source = Arc::new(GatedSource::held());
    let storage = storage(&source, Duration::from_secs(60));

    let leader = tokio::spawn({
        let storage = Arc::clone(&storage);
        async move { storage.fetch().await }
    });
    wait_until(|| source.calls() == 1).await;

    let waiter = tokio::spawn({
        let storage = Arc::clone(&storage);
        async move { storage.fetch().await }
    });
    wait_until(|| storage.stats().coalesced_requests == 1).await;

    leader.abort();
    assert!(leader.await.unwrap_err().is_cancelled());

    // The waiter takes over and issues its own call.
    wait_until(|| source.calls() == 2).await;
    source.release.notify_one();

    let status = waiter.await.unwrap();
    assert!(status.is_success());
    assert_eq!(source.calls(), 2);
    assert_eq!(storage.store().len(), 2);
}
