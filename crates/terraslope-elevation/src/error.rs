//! Error types for elevation lookup.

use thiserror::Error;

/// Errors that can occur when resolving the elevation of a single point.
///
/// Both variants are terminal for the point they name, not for an enclosing
/// batch: the batch fetcher absorbs them into NaN results.
#[derive(Debug, Error)]
pub enum ElevationError {
    /// The upstream service answered but had no elevation for the point
    /// (commonly open ocean, where GSI returns `"-----"`).
    #[error("no elevation data at ({lat}, {lon})")]
    NoElevationData {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
    },

    /// The network call failed, timed out, or returned a non-success status.
    #[error("elevation service unavailable: {reason}")]
    UpstreamUnavailable {
        /// Transport error or HTTP status description.
        reason: String,
    },
}

impl From<reqwest::Error> for ElevationError {
    fn from(err: reqwest::Error) -> Self {
        ElevationError::UpstreamUnavailable {
            reason: err.to_string(),
        }
    }
}
