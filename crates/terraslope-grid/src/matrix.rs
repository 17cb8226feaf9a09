//! Dense elevation matrix for visualization and statistics.

use serde::Serialize;
use terraslope_elevation::GridElevation;

/// A dense rows×cols elevation matrix.
///
/// `z[row][col]` is `None` both for cells outside the polygon (never sampled)
/// and for cells whose elevation lookup failed; the two causes render
/// identically to consumers. `x` and `y` are plain index axes for plotting.
#[derive(Debug, Clone, Serialize)]
pub struct ElevationMatrix {
    /// Elevation per cell in meters, row-major, row 0 = north.
    pub z: Vec<Vec<Option<f64>>>,
    /// Column indices, `0..cols`.
    pub x: Vec<usize>,
    /// Row indices, `0..rows`.
    pub y: Vec<usize>,
}

impl ElevationMatrix {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.z.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.z.first().map(Vec::len).unwrap_or(0)
    }

    /// Elevation at a cell, `None` when unsampled, failed, or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        *self.z.get(row)?.get(col)?
    }
}

/// Reshape a sparse list of resolved grid elevations into a dense matrix.
///
/// Cells never mentioned stay `None`; `NaN` elevations (failed lookups) also
/// stay `None`. Results referencing cells outside rows×cols are skipped with
/// a warning rather than panicking on a buggy caller.
pub fn build_matrix(elevations: &[GridElevation], rows: usize, cols: usize) -> ElevationMatrix {
    let mut z = vec![vec![None; cols]; rows];

    for e in elevations {
        if e.point.row >= rows || e.point.col >= cols {
            tracing::warn!(
                row = e.point.row,
                col = e.point.col,
                rows,
                cols,
                "grid elevation outside matrix bounds, skipping"
            );
            continue;
        }
        if e.elevation.is_finite() {
            z[e.point.row][e.point.col] = Some(e.elevation);
        }
    }

    ElevationMatrix {
        z,
        x: (0..cols).collect(),
        y: (0..rows).collect(),
    }
}
