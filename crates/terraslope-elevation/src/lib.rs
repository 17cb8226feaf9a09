//! # terraslope-elevation
//!
//! Single-point and batch elevation lookup against the GSI terrain service,
//! with a bounded, time-expiring cache in front of the network.
//!
//! ## Overview
//!
//! - [`ElevationCache`]: process-wide cache keyed by coordinates quantized
//!   to 8 decimal places, with a 1-hour TTL and insertion-order eviction at
//!   50,000 entries.
//! - [`GsiClient`]: blocking HTTP client for the GSI elevation endpoint,
//!   cache-integrated, implementing [`ElevationProvider`].
//! - [`fetch_batch`]: fixed-width worker pool resolving many points at
//!   once, degrading per-point failures to `NaN` instead of aborting.
//!
//! ## Example
//!
//! ```no_run
//! use terraslope_elevation::{Coordinate, ElevationProvider, GsiClient};
//!
//! let client = GsiClient::new()?;
//! let elevation = client.elevation_at(Coordinate::new(35.3606, 138.7274))?;
//! println!("Mt. Fuji area elevation: {elevation} m");
//! # Ok::<(), terraslope_elevation::ElevationError>(())
//! ```

mod batch;
mod cache;
mod client;
mod coord;
mod error;

pub use batch::{fetch_batch, DEFAULT_CONCURRENCY};
pub use cache::{ElevationCache, DEFAULT_CAPACITY, DEFAULT_TTL};
pub use client::{ElevationProvider, GsiClient};
pub use coord::{CoordKey, Coordinate, GridElevation, GridPoint};
pub use error::ElevationError;

/// Result type for elevation operations.
pub type Result<T> = std::result::Result<T, ElevationError>;
