//! Mutual-exclusion gate for refreshes.
//!
//! The gate admits one leader at a time. Every caller arriving while the
//! gate is held becomes a waiter and is woken exactly once when the leader
//! releases it, receiving the status the leader recorded.
//!
//! # Implementation
//!
//! The gate holds a broadcast sender while locked. Waiters subscribe to it
//! under the gate's mutex; releasing takes the sender out under the same
//! mutex before broadcasting, so no waiter can subscribe after the result
//! was sent. A leader that is dropped without releasing (e.g. its future was
//! cancelled) unlocks the gate without sending; waiters observe the closed
//! channel and may retry.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use super::status::LoadStatus;

/// Single-holder gate with broadcast wake-up.
#[derive(Debug, Default)]
pub struct FetchGate {
    in_flight: Mutex<Option<broadcast::Sender<Arc<LoadStatus>>>>,
}

/// Result of trying to acquire the gate.
pub enum GateTicket<'a> {
    /// The caller holds the gate and must release it when done.
    Leader(GateGuard<'a>),
    /// The gate is held elsewhere; wait on this receiver for the result.
    Waiter(broadcast::Receiver<Arc<LoadStatus>>),
}

impl GateTicket<'_> {
    pub fn is_leader(&self) -> bool {
        matches!(self, GateTicket::Leader(_))
    }
}

impl FetchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a leader holds the gate.
    pub fn is_locked(&self) -> bool {
        self.in_flight.lock().is_some()
    }

    /// Acquire the gate, or subscribe to the current holder's release.
    pub fn acquire(&self) -> GateTicket<'_> {
        let mut in_flight = self.in_flight.lock();

        if let Some(tx) = in_flight.as_ref() {
            return GateTicket::Waiter(tx.subscribe());
        }

        // One value is ever sent per lock cycle.
        let (tx, _rx) = broadcast::channel(1);
        *in_flight = Some(tx.clone());
        GateTicket::Leader(GateGuard {
            gate: self,
            sender: Some(tx),
        })
    }

    fn unlock(&self) {
        self.in_flight.lock().take();
    }
}

/// Held by the leader while the gate is locked.
pub struct GateGuard<'a> {
    gate: &'a FetchGate,
    sender: Option<broadcast::Sender<Arc<LoadStatus>>>,
}

impl GateGuard<'_> {
    /// Unlock the gate and hand `status` to every waiter.
    ///
    /// Returns the number of waiters notified.
    pub fn release(mut self, status: Arc<LoadStatus>) -> usize {
        self.gate.unlock();
        match self.sender.take() {
            Some(tx) => tx.send(status).unwrap_or(0),
            None => 0,
        }
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        if self.sender.take().is_some() {
            self.gate.unlock();
        }
    }
}
