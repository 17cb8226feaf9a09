//! Error types for terrain analysis.

use terraslope_elevation::ElevationError;
use terraslope_grid::GridError;
use thiserror::Error;

/// Errors that can occur during slope analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Coordinate outside the supported service area.
    #[error("coordinate ({lat}, {lon}) is outside the supported area (lat {min_lat}-{max_lat}, lon {min_lon}-{max_lon})")]
    InvalidCoordinate {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
        /// Southern limit of the service area.
        min_lat: f64,
        /// Northern limit of the service area.
        max_lat: f64,
        /// Western limit of the service area.
        min_lon: f64,
        /// Eastern limit of the service area.
        max_lon: f64,
    },

    /// Slope calculation invoked with an unusable sample set.
    #[error("invalid sample set: {0}")]
    InvalidSampleSet(String),

    /// A grid produced no cells with enough neighbors to compute statistics.
    #[error("grid contains no valid slope cells")]
    EmptyGrid,

    /// Elevation lookup failed on the single-point path.
    #[error(transparent)]
    Elevation(#[from] ElevationError),

    /// Polygon or interval was structurally invalid.
    #[error(transparent)]
    Grid(#[from] GridError),
}
