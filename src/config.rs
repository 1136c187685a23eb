//! Lasso tuning parameters.

use crate::error::{check_distance, LassoError, Result};

/// All lasso parameters in one struct.
///
/// Distances are in grid units (tiles). Values can be changed between
/// selections; the engine validates them when they are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LassoConfig {
    /// Points closer than this to the previous recorded point are dropped.
    /// Filters sub-tile jitter from the pointing device.
    pub min_point_distance: f64,
    /// Douglas-Peucker epsilon used when the path is closed.
    pub simplify_tolerance: f64,
    /// While drawing, the preview path is refreshed every N recorded points.
    pub preview_interval: usize,
}

impl Default for LassoConfig {
    fn default() -> Self {
        Self {
            min_point_distance: 0.5,
            simplify_tolerance: 0.5,
            preview_interval: 20,
        }
    }
}

impl LassoConfig {
    pub fn with_min_point_distance(mut self, distance: f64) -> Self {
        self.min_point_distance = distance;
        self
    }

    pub fn with_simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = tolerance;
        self
    }

    pub fn with_preview_interval(mut self, interval: usize) -> Self {
        self.preview_interval = interval;
        self
    }

    /// Check every field, returning the first invalid one.
    pub fn validate(&self) -> Result<()> {
        check_distance("min_point_distance", self.min_point_distance)?;
        check_distance("simplify_tolerance", self.simplify_tolerance)?;
        if self.preview_interval == 0 {
            return Err(LassoError::ZeroPreviewInterval);
        }
        Ok(())
    }

    /// Squared minimum distance, compared against squared point spacing.
    #[inline]
    pub fn min_point_distance_squared(&self) -> f64 {
        self.min_point_distance * self.min_point_distance
    }
}
