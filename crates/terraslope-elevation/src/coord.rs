//! Geographic coordinate and grid point value types.

use serde::{Deserialize, Serialize};

/// Quantization factor for cache keys: 8 decimal places (~1.1 mm at the
/// equator), fine enough that numerically-equal coordinates always collide.
const KEY_SCALE: f64 = 1e8;

/// A WGS84 geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees (positive = north).
    pub lat: f64,
    /// Longitude in decimal degrees (positive = east).
    pub lon: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Quantized cache key for this coordinate.
    pub fn key(&self) -> CoordKey {
        CoordKey {
            lat: (self.lat * KEY_SCALE).round() as i64,
            lon: (self.lon * KEY_SCALE).round() as i64,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Cache key derived from a coordinate quantized to 8 decimal places.
///
/// Floating-point noise below the quantization step maps to the same key, so
/// differently-formatted representations of the same point share one cache
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lat: i64,
    lon: i64,
}

/// A sample location inside a polygon grid.
///
/// `row` 0 is the northern edge and increases southward; `col` 0 is the
/// western edge and increases eastward. Downstream consumers index matrices
/// by these fields, so the orientation is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    /// Geographic location of the sample.
    pub coord: Coordinate,
    /// Zero-based row index (north to south).
    pub row: usize,
    /// Zero-based column index (west to east).
    pub col: usize,
}

/// A grid point together with its resolved elevation.
///
/// Elevation is `NaN` when the lookup failed (no upstream coverage or the
/// service was unavailable); `NaN` is distinguishable from a legitimate
/// zero-meter elevation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridElevation {
    /// The grid point this elevation belongs to.
    pub point: GridPoint,
    /// Elevation in meters, or `NaN` if the lookup failed.
    pub elevation: f64,
}

impl GridElevation {
    /// True if the elevation lookup failed for this point.
    pub fn is_missing(&self) -> bool {
        !self.elevation.is_finite()
    }
}
