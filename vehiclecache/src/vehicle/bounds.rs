//! Validated bounding boxes for spatial queries.

use crate::error::VehicleError;

/// Axis-aligned bounding box in the same coordinate units as the records.
///
/// Construction guarantees `left < right` and `top > bottom`. All four edges
/// are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl GeoBounds {
    /// Create a bounding box, rejecting inverted or empty boxes.
    ///
    /// NaN edges are rejected as well.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Result<Self, VehicleError> {
        if left.is_nan() || right.is_nan() || left >= right {
            return Err(VehicleError::InvalidArgument(format!(
                "left must be smaller than right (left={}, right={})",
                left, right
            )));
        }
        if top.is_nan() || bottom.is_nan() || top <= bottom {
            return Err(VehicleError::InvalidArgument(format!(
                "top must be greater than bottom (top={}, bottom={})",
                top, bottom
            )));
        }
        Ok(Self {
            left,
            right,
            top,
            bottom,
        })
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Returns true if the point lies inside or on the edge of the box.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        longitude >= self.left
            && longitude <= self.right
            && latitude >= self.bottom
            && latitude <= self.top
    }
}
