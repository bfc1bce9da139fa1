//! Query error types.

use std::sync::Arc;

use thiserror::Error;

use crate::source::SourceError;

/// Errors returned by store and storage queries.
#[derive(Debug, Clone, Error)]
pub enum VehicleError {
    /// Malformed query arguments, e.g. an inverted bounding box.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No current record matches the queried vehicle or trip id.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The last refresh failed; carries the cause recorded for it.
    #[error("Remote source failed: {0}")]
    Remote(Arc<SourceError>),
}

impl VehicleError {
    pub(crate) fn vehicle_not_found(id: &str) -> Self {
        VehicleError::NotFound {
            kind: "Vehicle",
            id: id.to_string(),
        }
    }

    pub(crate) fn trip_not_found(id: &str) -> Self {
        VehicleError::NotFound {
            kind: "Trip",
            id: id.to_string(),
        }
    }

    /// Returns true for [`VehicleError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, VehicleError::NotFound { .. })
    }
}
