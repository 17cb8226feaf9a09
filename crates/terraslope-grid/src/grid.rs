//! Sampling grid generation over a polygon.

use crate::polygon::{bounding_box, covers, validate_ring};
use crate::{GridError, Result};
use terraslope_elevation::{Coordinate, GridPoint};

/// Mean Earth radius in meters, used to convert metric spacing to degrees.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Minimum supported grid interval in meters.
pub const MIN_INTERVAL_M: f64 = 1.0;

/// Maximum supported grid interval in meters.
///
/// Together with the minimum this keeps grid sizes tractable for the
/// field-scale polygons this system analyzes.
pub const MAX_INTERVAL_M: f64 = 50.0;

/// A sampling grid generated from a polygon boundary.
///
/// `points` holds only the candidates that passed the containment test, so it
/// is sparse relative to `rows × cols`. The matrix builder re-densifies it.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    /// Grid points inside the polygon.
    pub points: Vec<GridPoint>,
    /// Number of rows spanning the bounding box, north to south.
    pub rows: usize,
    /// Number of columns spanning the bounding box, west to east.
    pub cols: usize,
    /// Latitude of row 0 (northern edge of the bounding box).
    pub origin_lat: f64,
    /// Longitude of column 0 (western edge of the bounding box).
    pub origin_lon: f64,
    /// Grid spacing in meters.
    pub interval_m: f64,
}

/// Generate the set of interior sample coordinates for a polygon at a metric
/// spacing.
///
/// The meter interval is converted to a latitude step via the mean Earth
/// radius and to a longitude step scaled by the cosine of the bounding box's
/// center latitude. Using one fixed conversion factor for the whole grid is
/// an equirectangular approximation, accepted for grids tens of meters
/// across.
///
/// Row 0 sits on the northern edge of the bounding box and rows advance
/// southward; column 0 sits on the western edge and columns advance eastward.
/// Candidates outside the ring are silently dropped; candidates on the ring
/// boundary count as interior (see [`covers`]).
pub fn generate_grid(ring: &[Coordinate], interval_m: f64) -> Result<SampleGrid> {
    if !(MIN_INTERVAL_M..=MAX_INTERVAL_M).contains(&interval_m) {
        return Err(GridError::InvalidInterval {
            interval: interval_m,
            min: MIN_INTERVAL_M,
            max: MAX_INTERVAL_M,
        });
    }
    validate_ring(ring)?;

    let bbox = bounding_box(ring);
    let (d_lat, d_lon) = degree_steps(interval_m, bbox.center_lat());

    let rows = span_steps(bbox.max_lat - bbox.min_lat, d_lat) + 1;
    let cols = span_steps(bbox.max_lon - bbox.min_lon, d_lon) + 1;

    let mut points = Vec::new();
    for row in 0..rows {
        let lat = bbox.max_lat - row as f64 * d_lat;
        for col in 0..cols {
            let lon = bbox.min_lon + col as f64 * d_lon;
            let coord = Coordinate::new(lat, lon);
            if covers(ring, coord) {
                points.push(GridPoint { coord, row, col });
            }
        }
    }

    tracing::debug!(
        rows,
        cols,
        inside = points.len(),
        interval_m,
        "generated sampling grid"
    );

    Ok(SampleGrid {
        points,
        rows,
        cols,
        origin_lat: bbox.max_lat,
        origin_lon: bbox.min_lon,
        interval_m,
    })
}

/// Number of whole steps covering a degree span, tolerant of float noise
/// when the span is an exact multiple of the step.
fn span_steps(span: f64, step: f64) -> usize {
    ((span / step) - 1e-9).ceil().max(0.0) as usize
}

/// Convert a metric spacing into (latitude, longitude) degree steps at the
/// given reference latitude.
pub fn degree_steps(interval_m: f64, ref_lat: f64) -> (f64, f64) {
    let d_lat = (interval_m / EARTH_RADIUS_M).to_degrees();
    let d_lon = (interval_m / (EARTH_RADIUS_M * ref_lat.to_radians().cos())).to_degrees();
    (d_lat, d_lon)
}
