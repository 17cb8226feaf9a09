//! Bounded-concurrency batch elevation fetching.
//!
//! A fixed number of worker threads drain one shared queue of grid points.
//! Each point yields exactly one result: either its elevation or `NaN` when
//! the lookup failed. Failures are data at this boundary, never control flow,
//! so a batch always completes with one result per input.
//!
//! Result order is whatever order the workers finish in. Correlation back to
//! the request goes through the `row`/`col` fields carried on every result,
//! never through arrival order.

use crate::{ElevationProvider, GridElevation, GridPoint};
use std::thread;

/// Default number of concurrent workers per batch.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Resolve elevations for a set of grid points with bounded concurrency.
///
/// `concurrency` caps the number of simultaneous upstream requests; a value
/// of 0 is clamped to 1, and pools larger than the input are shrunk to fit.
/// Per-point failures (no coverage, upstream down) are absorbed into
/// `NaN`-elevation results rather than aborting the batch.
pub fn fetch_batch<P: ElevationProvider + ?Sized>(
    provider: &P,
    points: Vec<GridPoint>,
    concurrency: usize,
) -> Vec<GridElevation> {
    let total = points.len();
    if total == 0 {
        return Vec::new();
    }
    let workers = concurrency.max(1).min(total);

    let (work_tx, work_rx) = crossbeam_channel::unbounded::<GridPoint>();
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<GridElevation>();

    for point in points {
        // Unbounded channel with all receivers alive; send cannot fail here.
        let _ = work_tx.send(point);
    }
    // Workers drain until the queue is empty, then see a disconnect.
    drop(work_tx);

    tracing::debug!(total, workers, "starting batch elevation fetch");

    thread::scope(|scope| {
        for _ in 0..workers {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                while let Ok(point) = work_rx.recv() {
                    let elevation = match provider.elevation_at(point.coord) {
                        Ok(elevation) => elevation,
                        Err(err) => {
                            tracing::debug!(
                                row = point.row,
                                col = point.col,
                                %err,
                                "elevation lookup failed, marking point absent"
                            );
                            f64::NAN
                        }
                    };
                    let _ = result_tx.send(GridElevation { point, elevation });
                }
            });
        }
    });
    drop(result_tx);

    let results: Vec<GridElevation> = result_rx.iter().collect();
    debug_assert_eq!(results.len(), total);

    let failed = results.iter().filter(|r| r.is_missing()).count();
    if failed > 0 {
        tracing::warn!(total, failed, "batch completed with missing elevations");
    }
    results
}
