//! Configuration for the fetch coordinator.

use std::time::Duration;

use crate::source::PositionMode;

/// Default minimum interval between refreshes (10 seconds).
pub const DEFAULT_UPDATE_DELAY: Duration = Duration::from_secs(10);

/// Default record time-to-live (no expiry).
pub const DEFAULT_TTL: Duration = Duration::ZERO;

/// Configuration for [`VehicleStorage`](super::VehicleStorage).
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Minimum wall-clock interval between refresh attempts.
    pub update_delay: Duration,

    /// Record time-to-live; zero disables expiry.
    pub ttl: Duration,

    /// Position mode used by [`fetch`](super::VehicleStorage::fetch).
    pub position_mode: PositionMode,
}

impl StorageConfig {
    /// Set the update delay.
    pub fn with_update_delay(mut self, update_delay: Duration) -> Self {
        self.update_delay = update_delay;
        self
    }

    /// Set the record time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the default position mode.
    pub fn with_position_mode(mut self, position_mode: PositionMode) -> Self {
        self.position_mode = position_mode;
        self
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            update_delay: DEFAULT_UPDATE_DELAY,
            ttl: DEFAULT_TTL,
            position_mode: PositionMode::Raw,
        }
    }
}
