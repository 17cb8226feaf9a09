//! Grid-wide slope computation and distributional statistics.

use crate::{AnalysisError, Result, SlopeClass};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use terraslope_grid::ElevationMatrix;

/// Share of grid cells falling in one slope band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassShare {
    /// The slope band.
    pub class: SlopeClass,
    /// Number of valid cells in the band.
    pub count: usize,
    /// Percentage of valid cells in the band; shares sum to 100.
    pub percent: f64,
}

/// Aggregate slope statistics over a grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlopeStats {
    /// Mean slope over valid cells, degrees.
    pub mean_degrees: f64,
    /// Minimum slope over valid cells, degrees.
    pub min_degrees: f64,
    /// Maximum slope over valid cells, degrees.
    pub max_degrees: f64,
    /// Population standard deviation of slope, degrees.
    pub std_degrees: f64,
    /// Max minus min elevation over sampled matrix cells, meters.
    pub elevation_range: f64,
    /// Number of cells with a computable slope.
    pub sampled_cells: usize,
    /// Per-band cell counts and percentages, ascending severity.
    pub distribution: [ClassShare; 5],
}

/// Per-cell slope angles derived from an elevation matrix.
///
/// Each cell's gradient comes from its four matrix neighbors at the grid
/// interval, the same centered finite differences as the five-point cross
/// (the neighbors in the matrix are exactly the cardinal offsets at
/// `interval_m`). Cells missing any of the four neighbors, including the
/// entire outer border, get `None`.
pub fn slope_grid(matrix: &ElevationMatrix, interval_m: f64) -> Vec<Vec<Option<f64>>> {
    let rows = matrix.rows();
    let cols = matrix.cols();
    let mut slopes = vec![vec![None; cols]; rows];

    if rows < 3 || cols < 3 {
        return slopes;
    }

    for row in 1..rows - 1 {
        for col in 1..cols - 1 {
            // Row 0 is north, so north is the row above.
            let north = matrix.get(row - 1, col);
            let south = matrix.get(row + 1, col);
            let east = matrix.get(row, col + 1);
            let west = matrix.get(row, col - 1);

            if let (Some(n), Some(s), Some(e), Some(w)) = (north, south, east, west) {
                let gradient_ns = (n - s) / (2.0 * interval_m);
                let gradient_ew = (e - w) / (2.0 * interval_m);
                let degrees = gradient_ns.hypot(gradient_ew).atan().to_degrees();
                slopes[row][col] = Some(degrees);
            }
        }
    }

    slopes
}

/// Summarize a slope grid.
///
/// Statistics run over the non-`None` slope cells only; `None` cells (holes
/// and border) are excluded from every denominator. The elevation range comes
/// from the sampled matrix cells. Fails with [`AnalysisError::EmptyGrid`]
/// when no cell has a computable slope.
pub fn compute_stats(slopes: &[Vec<Option<f64>>], matrix: &ElevationMatrix) -> Result<SlopeStats> {
    let valid: Vec<f64> = slopes.iter().flatten().filter_map(|s| *s).collect();
    if valid.is_empty() {
        return Err(AnalysisError::EmptyGrid);
    }

    let mut counts = [0usize; 5];
    for degrees in &valid {
        let class = SlopeClass::from_degrees(*degrees);
        let idx = SlopeClass::ALL
            .iter()
            .position(|c| *c == class)
            .unwrap_or(0);
        counts[idx] += 1;
    }

    let total = valid.len();
    let distribution = std::array::from_fn(|i| ClassShare {
        class: SlopeClass::ALL[i],
        count: counts[i],
        percent: 100.0 * counts[i] as f64 / total as f64,
    });

    let elevations: Vec<f64> = matrix.z.iter().flatten().filter_map(|e| *e).collect();
    let elevation_range = if elevations.is_empty() {
        0.0
    } else {
        Statistics::max(&elevations) - Statistics::min(&elevations)
    };

    Ok(SlopeStats {
        mean_degrees: Statistics::mean(&valid),
        min_degrees: Statistics::min(&valid),
        max_degrees: Statistics::max(&valid),
        std_degrees: Statistics::population_std_dev(&valid),
        elevation_range,
        sampled_cells: total,
        distribution,
    })
}
