//! Slope and aspect from a five-point cross sample.
//!
//! The cross method samples the elevation at a center point and at four
//! points offset north, south, east, and west by a fixed distance. The
//! north-south and east-west gradients come from centered finite differences
//! over the directional pairs; the center elevation is descriptive output
//! only and never enters the gradient estimate.

use crate::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use terraslope_elevation::Coordinate;
use terraslope_grid::degree_steps;

/// Default cardinal offset for cross sampling, in meters.
pub const DEFAULT_SAMPLE_OFFSET_M: f64 = 10.0;

/// Position of a sample within the cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleLabel {
    /// The point being analyzed.
    Center,
    /// Offset north of center.
    North,
    /// Offset south of center.
    South,
    /// Offset east of center.
    East,
    /// Offset west of center.
    West,
}

/// One elevation sample within a cross.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ElevationSample {
    /// Where the sample was taken.
    pub coord: Coordinate,
    /// Elevation in meters; `NaN` marks a failed lookup.
    pub elevation: f64,
    /// The sample's position in the cross.
    pub label: SampleLabel,
}

/// The five coordinates of a cross sample, before elevation lookup.
#[derive(Debug, Clone, Copy)]
pub struct CrossCoordinates {
    /// The analyzed point itself.
    pub center: Coordinate,
    /// `offset_m` meters north of center.
    pub north: Coordinate,
    /// `offset_m` meters south of center.
    pub south: Coordinate,
    /// `offset_m` meters east of center.
    pub east: Coordinate,
    /// `offset_m` meters west of center.
    pub west: Coordinate,
}

/// Build the cross-sample coordinates around a center point.
///
/// The metric offset converts to degrees at the center's own latitude, the
/// same flat-earth approximation the grid generator uses.
pub fn cross_coordinates(center: Coordinate, offset_m: f64) -> CrossCoordinates {
    let (d_lat, d_lon) = degree_steps(offset_m, center.lat);
    CrossCoordinates {
        center,
        north: Coordinate::new(center.lat + d_lat, center.lon),
        south: Coordinate::new(center.lat - d_lat, center.lon),
        east: Coordinate::new(center.lat, center.lon + d_lon),
        west: Coordinate::new(center.lat, center.lon - d_lon),
    }
}

/// A complete five-point cross with resolved elevations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossSamples {
    /// Center sample.
    pub center: ElevationSample,
    /// Northern sample.
    pub north: ElevationSample,
    /// Southern sample.
    pub south: ElevationSample,
    /// Eastern sample.
    pub east: ElevationSample,
    /// Western sample.
    pub west: ElevationSample,
}

impl CrossSamples {
    /// All five samples in a fixed order (center first).
    pub fn all(&self) -> [&ElevationSample; 5] {
        [&self.center, &self.north, &self.south, &self.east, &self.west]
    }
}

/// Eight-point compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassDirection {
    /// North.
    N,
    /// Northeast.
    NE,
    /// East.
    E,
    /// Southeast.
    SE,
    /// South.
    S,
    /// Southwest.
    SW,
    /// West.
    W,
    /// Northwest.
    NW,
}

impl CompassDirection {
    /// Map a compass bearing to its 45° sector. Sectors are centered on each
    /// direction, so north covers [337.5°, 360°) ∪ [0°, 22.5°).
    pub fn from_bearing(degrees: f64) -> Self {
        const DIRECTIONS: [CompassDirection; 8] = [
            CompassDirection::N,
            CompassDirection::NE,
            CompassDirection::E,
            CompassDirection::SE,
            CompassDirection::S,
            CompassDirection::SW,
            CompassDirection::W,
            CompassDirection::NW,
        ];
        let normalized = degrees.rem_euclid(360.0);
        let sector = ((normalized + 22.5) / 45.0).floor() as usize % 8;
        DIRECTIONS[sector]
    }

    /// Short label ("N", "NE", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            CompassDirection::N => "N",
            CompassDirection::NE => "NE",
            CompassDirection::E => "E",
            CompassDirection::SE => "SE",
            CompassDirection::S => "S",
            CompassDirection::SW => "SW",
            CompassDirection::W => "W",
            CompassDirection::NW => "NW",
        }
    }
}

impl std::fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slope magnitude and downhill direction at a point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlopeMeasure {
    /// Slope angle in degrees from horizontal.
    pub slope_degrees: f64,
    /// Slope as a percentage (`100 * tan(slope)`).
    pub slope_percent: f64,
    /// Compass bearing of steepest descent, in [0, 360). Meaningless on
    /// perfectly flat ground, where it defaults to 0.
    pub aspect_degrees: f64,
    /// Eight-point label for `aspect_degrees`.
    pub aspect: CompassDirection,
}

/// Compute slope and aspect from a cross sample.
///
/// Gradients are centered finite differences over the directional pairs:
/// `(north - south) / (2 * offset)` and `(east - west) / (2 * offset)`.
/// Any non-finite directional elevation is an error, never a zero-slope
/// default, because treating missing data as flat would silently corrupt the
/// downstream classification.
pub fn calculate_slope(samples: &CrossSamples, offset_m: f64) -> Result<SlopeMeasure> {
    if !(offset_m > 0.0) {
        return Err(AnalysisError::InvalidSampleSet(format!(
            "sample offset must be positive, got {offset_m}"
        )));
    }
    for sample in [&samples.north, &samples.south, &samples.east, &samples.west] {
        if !sample.elevation.is_finite() {
            return Err(AnalysisError::InvalidSampleSet(format!(
                "{:?} sample at {} has no elevation",
                sample.label, sample.coord
            )));
        }
    }

    // Elevation increase per meter northward / eastward.
    let gradient_ns = (samples.north.elevation - samples.south.elevation) / (2.0 * offset_m);
    let gradient_ew = (samples.east.elevation - samples.west.elevation) / (2.0 * offset_m);

    let slope_radians = gradient_ns.hypot(gradient_ew).atan();
    let slope_degrees = slope_radians.to_degrees();
    let slope_percent = 100.0 * slope_radians.tan();

    // Bearing of the downhill vector (-gradient), measured clockwise from
    // north: atan2(east component, north component).
    let aspect_degrees = if gradient_ns == 0.0 && gradient_ew == 0.0 {
        0.0
    } else {
        (-gradient_ew).atan2(-gradient_ns).to_degrees().rem_euclid(360.0)
    };

    Ok(SlopeMeasure {
        slope_degrees,
        slope_percent,
        aspect_degrees,
        aspect: CompassDirection::from_bearing(aspect_degrees),
    })
}
