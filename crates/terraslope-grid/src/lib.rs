//! # terraslope-grid
//!
//! Computational geometry for terrain sampling: polygon validation and
//! containment, metric sampling-grid generation, and the dense elevation
//! matrix handed to visualization and statistics.
//!
//! The meter-to-degree conversion uses a fixed factor per grid, derived at
//! the bounding box's center latitude (equirectangular approximation). That
//! is deliberately approximate and fine at the tens-of-meters grid sizes this
//! system works with.
//!
//! ## Example
//!
//! ```
//! use terraslope_elevation::Coordinate;
//! use terraslope_grid::generate_grid;
//!
//! let ring = vec![
//!     Coordinate::new(35.0000, 139.0000),
//!     Coordinate::new(35.0000, 139.0004),
//!     Coordinate::new(35.0003, 139.0004),
//!     Coordinate::new(35.0003, 139.0000),
//!     Coordinate::new(35.0000, 139.0000),
//! ];
//! let grid = generate_grid(&ring, 10.0)?;
//! assert!(grid.points.len() <= grid.rows * grid.cols);
//! # Ok::<(), terraslope_grid::GridError>(())
//! ```

mod error;
mod grid;
mod matrix;
mod polygon;

pub use error::GridError;
pub use grid::{
    degree_steps, generate_grid, SampleGrid, EARTH_RADIUS_M, MAX_INTERVAL_M, MIN_INTERVAL_M,
};
pub use matrix::{build_matrix, ElevationMatrix};
pub use polygon::{bounding_box, contains, covers, validate_ring, BoundingBox};

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
