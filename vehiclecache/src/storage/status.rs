//! Outcome of the most recent refresh.

use std::sync::Arc;

use crate::source::SourceError;
use crate::time::Timestamp;

/// A successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessStatus {
    /// Upstream `last_update` of the merged response.
    pub last_update: Timestamp,
    /// Wall-clock time the outcome was recorded.
    pub timestamp: Timestamp,
}

/// A failed refresh.
#[derive(Debug, Clone)]
pub struct ErrorStatus {
    /// Cause reported by the source, shared with every waiter.
    pub error: Arc<SourceError>,
    /// Watermark as of the failure. Never advanced by a failed refresh.
    pub last_update: Timestamp,
    /// Wall-clock time the outcome was recorded.
    pub timestamp: Timestamp,
}

/// Recorded outcome of a refresh.
#[derive(Debug, Clone)]
pub enum LoadStatus {
    Success(SuccessStatus),
    Error(ErrorStatus),
}

impl LoadStatus {
    /// Watermark known as of this outcome.
    pub fn last_update(&self) -> Timestamp {
        match self {
            LoadStatus::Success(s) => s.last_update,
            LoadStatus::Error(e) => e.last_update,
        }
    }

    /// Wall-clock time the outcome was recorded.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            LoadStatus::Success(s) => s.timestamp,
            LoadStatus::Error(e) => e.timestamp,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoadStatus::Success(_))
    }

    /// The failure cause, if this is an error status.
    pub fn error(&self) -> Option<&Arc<SourceError>> {
        match self {
            LoadStatus::Success(_) => None,
            LoadStatus::Error(e) => Some(&e.error),
        }
    }
}
