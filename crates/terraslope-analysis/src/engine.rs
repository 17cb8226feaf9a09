//! Terrain analysis facade over elevation lookup, gridding and slope math.

use crate::slope::{cross_coordinates, CrossSamples, ElevationSample, SampleLabel};
use crate::{calculate_slope, compute_stats, slope_grid, AnalysisError, CompassDirection, Result,
    SlopeClass, SlopeMeasure, SlopeStats, DEFAULT_SAMPLE_OFFSET_M};
use serde::{Deserialize, Serialize};
use terraslope_elevation::{fetch_batch, Coordinate, ElevationProvider, DEFAULT_CONCURRENCY};
use terraslope_grid::{build_matrix, generate_grid, ElevationMatrix};

/// Supported service area (Japan bounding box): southern and northern
/// latitude limits.
pub const SERVICE_AREA_LAT: (f64, f64) = (20.0, 46.0);

/// Supported service area: western and eastern longitude limits.
pub const SERVICE_AREA_LON: (f64, f64) = (122.0, 154.0);

/// Full slope analysis of a single point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlopeResult {
    /// Elevation at the analyzed point, meters.
    pub center_elevation: f64,
    /// The five cross samples the analysis used.
    pub samples: CrossSamples,
    /// Slope angle in degrees.
    pub slope_degrees: f64,
    /// Slope as a percentage.
    pub slope_percent: f64,
    /// Compass bearing of steepest descent, degrees.
    pub aspect_degrees: f64,
    /// Eight-point aspect label.
    pub aspect: CompassDirection,
    /// Severity band for `slope_degrees`.
    pub classification: SlopeClass,
}

/// Full slope analysis of a polygon at a metric grid interval.
#[derive(Debug, Clone, Serialize)]
pub struct GridAnalysis {
    /// Rows in the sampling grid (north to south).
    pub rows: usize,
    /// Columns in the sampling grid (west to east).
    pub cols: usize,
    /// Grid spacing in meters.
    pub interval_m: f64,
    /// Dense elevation matrix; `null` cells are outside the polygon or
    /// failed to resolve.
    pub matrix: ElevationMatrix,
    /// Aggregate slope statistics over the grid.
    pub stats: SlopeStats,
}

/// The two request paths of the analysis engine: single-point slope and
/// polygon grid analysis.
///
/// Generic over the elevation provider so tests run against synthetic
/// terrain; production wires in a
/// [`GsiClient`](terraslope_elevation::GsiClient).
#[derive(Debug)]
pub struct TerrainAnalyzer<P> {
    provider: P,
    concurrency: usize,
    sample_offset_m: f64,
}

impl<P: ElevationProvider> TerrainAnalyzer<P> {
    /// Create an analyzer with defaults: 10 concurrent fetches, 10 m sample
    /// offset.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            concurrency: DEFAULT_CONCURRENCY,
            sample_offset_m: DEFAULT_SAMPLE_OFFSET_M,
        }
    }

    /// Set the batch fetch concurrency.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the cardinal offset for single-point cross sampling.
    pub fn with_sample_offset(mut self, offset_m: f64) -> Self {
        self.sample_offset_m = offset_m;
        self
    }

    /// The provider backing this analyzer.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Analyze the slope at a single coordinate.
    ///
    /// Fetches the five-point cross around the coordinate and computes slope,
    /// aspect and classification. Unlike the polygon path, any failed lookup
    /// fails the whole request: a single-point result with missing samples is
    /// meaningless.
    pub fn analyze_point(&self, lat: f64, lon: f64) -> Result<SlopeResult> {
        validate_coordinate(lat, lon)?;
        let center = Coordinate::new(lat, lon);
        let coords = cross_coordinates(center, self.sample_offset_m);

        tracing::debug!(lat, lon, offset_m = self.sample_offset_m, "analyzing point slope");

        let sample = |coord: Coordinate, label: SampleLabel| -> Result<ElevationSample> {
            let elevation = self.provider.elevation_at(coord)?;
            Ok(ElevationSample {
                coord,
                elevation,
                label,
            })
        };

        let samples = CrossSamples {
            center: sample(coords.center, SampleLabel::Center)?,
            north: sample(coords.north, SampleLabel::North)?,
            south: sample(coords.south, SampleLabel::South)?,
            east: sample(coords.east, SampleLabel::East)?,
            west: sample(coords.west, SampleLabel::West)?,
        };

        let SlopeMeasure {
            slope_degrees,
            slope_percent,
            aspect_degrees,
            aspect,
        } = calculate_slope(&samples, self.sample_offset_m)?;

        Ok(SlopeResult {
            center_elevation: samples.center.elevation,
            samples,
            slope_degrees,
            slope_percent,
            aspect_degrees,
            aspect,
            classification: SlopeClass::from_degrees(slope_degrees),
        })
    }

    /// Analyze a polygon at a metric grid interval.
    ///
    /// Generates the interior sampling grid, fetches elevations with bounded
    /// concurrency, and summarizes per-cell slope over the resulting matrix.
    /// Individual lookup failures degrade to holes in the matrix; structural
    /// problems (bad ring, bad interval, no computable cells) fail the
    /// request.
    pub fn analyze_polygon(&self, ring: &[Coordinate], interval_m: f64) -> Result<GridAnalysis> {
        let grid = generate_grid(ring, interval_m)?;
        tracing::info!(
            rows = grid.rows,
            cols = grid.cols,
            points = grid.points.len(),
            interval_m,
            "analyzing polygon grid"
        );

        let elevations = fetch_batch(&self.provider, grid.points, self.concurrency);
        let matrix = build_matrix(&elevations, grid.rows, grid.cols);
        let slopes = slope_grid(&matrix, interval_m);
        let stats = compute_stats(&slopes, &matrix)?;

        Ok(GridAnalysis {
            rows: grid.rows,
            cols: grid.cols,
            interval_m,
            matrix,
            stats,
        })
    }
}

/// Check a coordinate against the supported service area.
fn validate_coordinate(lat: f64, lon: f64) -> Result<()> {
    let (min_lat, max_lat) = SERVICE_AREA_LAT;
    let (min_lon, max_lon) = SERVICE_AREA_LON;
    let lat_ok = lat.is_finite() && (min_lat..=max_lat).contains(&lat);
    let lon_ok = lon.is_finite() && (min_lon..=max_lon).contains(&lon);
    if !lat_ok || !lon_ok {
        return Err(AnalysisError::InvalidCoordinate {
            lat,
            lon,
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use terraslope_elevation::{ElevationError, Result as ElevationResult};

    /// Plane tilted down toward the south: elevation in meters is a linear
    /// function of latitude.
    struct TiltedPlane {
        meters_per_degree_lat: f64,
    }

    impl ElevationProvider for TiltedPlane {
        fn elevation_at(&self, coord: Coordinate) -> ElevationResult<f64> {
            Ok((coord.lat - 35.0) * self.meters_per_degree_lat)
        }
    }

    /// Provider with no coverage anywhere.
    struct NoCoverage;

    impl ElevationProvider for NoCoverage {
        fn elevation_at(&self, coord: Coordinate) -> ElevationResult<f64> {
            Err(ElevationError::NoElevationData {
                lat: coord.lat,
                lon: coord.lon,
            })
        }
    }

    #[test]
    fn test_validate_coordinate_bounds() {
        assert!(validate_coordinate(35.0, 139.0).is_ok());
        assert!(validate_coordinate(20.0, 122.0).is_ok());
        assert!(validate_coordinate(46.0, 154.0).is_ok());
        assert!(validate_coordinate(19.9, 139.0).is_err());
        assert!(validate_coordinate(46.1, 139.0).is_err());
        assert!(validate_coordinate(35.0, 121.9).is_err());
        assert!(validate_coordinate(35.0, 154.1).is_err());
        assert!(validate_coordinate(f64::NAN, 139.0).is_err());
    }

    #[test]
    fn test_analyze_point_south_facing() {
        // 100 m of drop per degree southward
        let analyzer = TerrainAnalyzer::new(TiltedPlane {
            meters_per_degree_lat: 100.0,
        });
        let result = analyzer.analyze_point(35.0, 139.0).unwrap();

        assert!(result.slope_degrees > 0.0);
        assert_eq!(result.aspect, CompassDirection::S);
        assert_eq!(result.classification, SlopeClass::Flat);
        assert_eq!(result.samples.center.label, SampleLabel::Center);
        approx::assert_relative_eq!(result.center_elevation, 0.0);
    }

    #[test]
    fn test_analyze_point_out_of_area() {
        let analyzer = TerrainAnalyzer::new(TiltedPlane {
            meters_per_degree_lat: 0.0,
        });
        assert!(matches!(
            analyzer.analyze_point(51.5, -0.1),
            Err(AnalysisError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_analyze_point_fails_without_coverage() {
        let analyzer = TerrainAnalyzer::new(NoCoverage);
        assert!(matches!(
            analyzer.analyze_point(35.0, 139.0),
            Err(AnalysisError::Elevation(_))
        ));
    }
}
