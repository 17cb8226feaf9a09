//! # terraslope-analysis
//!
//! Numerical terrain analysis: slope and aspect from five-point cross
//! samples, slope severity classification, grid statistics, and the
//! [`TerrainAnalyzer`] facade consumed by the HTTP handlers.
//!
//! ## Overview
//!
//! Two request paths share one engine:
//!
//! - **Single point**: sample a cross (center plus four cardinal offsets),
//!   compute slope angle, slope percent, downhill aspect, and a severity
//!   band.
//! - **Polygon grid**: sample the polygon interior at a metric interval,
//!   build a dense elevation matrix, derive per-cell slopes, and summarize
//!   the distribution.
//!
//! ## Example
//!
//! ```no_run
//! use terraslope_analysis::TerrainAnalyzer;
//! use terraslope_elevation::GsiClient;
//!
//! let analyzer = TerrainAnalyzer::new(GsiClient::new()?);
//! let result = analyzer.analyze_point(35.3606, 138.7274)?;
//! println!(
//!     "slope {:.1}° facing {} ({})",
//!     result.slope_degrees, result.aspect, result.classification
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod classify;
mod engine;
mod error;
mod slope;
mod stats;

pub use classify::SlopeClass;
pub use engine::{
    GridAnalysis, SlopeResult, TerrainAnalyzer, SERVICE_AREA_LAT, SERVICE_AREA_LON,
};
pub use error::AnalysisError;
pub use slope::{
    calculate_slope, cross_coordinates, CompassDirection, CrossCoordinates, CrossSamples,
    ElevationSample, SampleLabel, SlopeMeasure, DEFAULT_SAMPLE_OFFSET_M,
};
pub use stats::{compute_stats, slope_grid, ClassShare, SlopeStats};

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
