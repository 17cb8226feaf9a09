//! Error types for grid construction.

use thiserror::Error;

/// Errors that can occur when building a sampling grid from a polygon.
///
/// These are structural request errors: they surface immediately to the
/// caller instead of degrading into partial results.
#[derive(Debug, Error)]
pub enum GridError {
    /// The polygon ring cannot be used for containment testing.
    #[error("invalid polygon geometry: {0}")]
    InvalidGeometry(String),

    /// The grid interval is outside the supported range.
    #[error("invalid grid interval {interval} m (must be {min}-{max} m)")]
    InvalidInterval {
        /// Requested interval in meters.
        interval: f64,
        /// Minimum supported interval.
        min: f64,
        /// Maximum supported interval.
        max: f64,
    },
}
