//! Error type for configuration and host-integration failures.
//!
//! Geometry itself never fails: degenerate paths simply produce empty
//! results. Errors only come from invalid parameters and from masks handed
//! in by the host that do not fit the region they are combined with.

use thiserror::Error;

/// Errors reported by the lasso engine.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum LassoError {
    #[error("invalid value for {name}: {value} (must be finite and non-negative)")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("preview interval must be at least 1")]
    ZeroPreviewInterval,

    #[error("mask shape mismatch: expected {expected:?}, got {actual:?}")]
    MaskShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("unknown selection mode: {0:?} (expected replace, add or subtract)")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, LassoError>;

/// Reject NaN, infinite and negative distances.
pub(crate) fn check_distance(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LassoError::InvalidParameter { name, value })
    }
}
