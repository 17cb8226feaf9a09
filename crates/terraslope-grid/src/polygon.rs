//! Polygon ring validation and containment testing.

use crate::{GridError, Result};
use terraslope_elevation::Coordinate;

/// Axis-aligned bounding box of a polygon ring, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Western edge.
    pub min_lon: f64,
    /// Eastern edge.
    pub max_lon: f64,
}

impl BoundingBox {
    /// Latitude of the box center, used as the single meters-per-degree
    /// conversion factor for a whole grid.
    pub fn center_lat(&self) -> f64 {
        (self.min_lat + self.max_lat) / 2.0
    }
}

/// Validate a polygon ring for grid sampling.
///
/// Requires at least 4 coordinate pairs (a closed ring), a non-degenerate
/// bounding box, and no proper self-intersection between non-adjacent edges.
pub fn validate_ring(ring: &[Coordinate]) -> Result<()> {
    if ring.len() < 4 {
        return Err(GridError::InvalidGeometry(format!(
            "polygon ring has {} vertices, need at least 4",
            ring.len()
        )));
    }

    if ring.iter().any(|c| !c.lat.is_finite() || !c.lon.is_finite()) {
        return Err(GridError::InvalidGeometry(
            "polygon ring contains non-finite coordinates".to_string(),
        ));
    }

    let bbox = bounding_box(ring);
    if bbox.max_lat <= bbox.min_lat || bbox.max_lon <= bbox.min_lon {
        return Err(GridError::InvalidGeometry(
            "polygon ring is degenerate (zero-area bounding box)".to_string(),
        ));
    }

    if self_intersects(ring) {
        return Err(GridError::InvalidGeometry(
            "polygon ring is self-intersecting".to_string(),
        ));
    }

    Ok(())
}

/// Compute the bounding box of a ring. The ring must be non-empty.
pub fn bounding_box(ring: &[Coordinate]) -> BoundingBox {
    let mut bbox = BoundingBox {
        min_lat: f64::INFINITY,
        max_lat: f64::NEG_INFINITY,
        min_lon: f64::INFINITY,
        max_lon: f64::NEG_INFINITY,
    };
    for c in ring {
        bbox.min_lat = bbox.min_lat.min(c.lat);
        bbox.max_lat = bbox.max_lat.max(c.lat);
        bbox.min_lon = bbox.min_lon.min(c.lon);
        bbox.max_lon = bbox.max_lon.max(c.lon);
    }
    bbox
}

/// Ray-casting point-in-polygon test (even-odd rule).
///
/// Casts a ray eastward from the point and counts edge crossings. Works for
/// either winding order. Points exactly on an edge may land on either side;
/// the grid generator treats that as acceptable jitter at millimeter scale.
pub fn contains(ring: &[Coordinate], point: Coordinate) -> bool {
    let n = ring.len();
    if n == 0 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let intersect_lon = (b.lon - a.lon) * (point.lat - a.lat) / (b.lat - a.lat) + a.lon;
            if point.lon < intersect_lon {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Tolerance for treating a point as lying on a ring edge, in degrees.
/// 1e-8° is about a millimeter, far below any sampling interval this system
/// uses but enough to absorb the drift between ring vertices converted at
/// one latitude and grid candidates stepped at the bounding box center.
const EDGE_EPSILON_DEG: f64 = 1e-8;

/// Boundary-inclusive containment: inside the ring, or on its edge within a
/// millimeter-scale tolerance.
///
/// The grid generator places candidates directly on the bounding box edges,
/// which coincide with the ring for rectangular polygons; strict even-odd
/// containment would drop an entire boundary row to float noise, so grid
/// sampling uses this predicate instead of [`contains`].
pub fn covers(ring: &[Coordinate], point: Coordinate) -> bool {
    contains(ring, point) || on_boundary(ring, point)
}

/// True if the point sits within [`EDGE_EPSILON_DEG`] of any ring edge.
fn on_boundary(ring: &[Coordinate], point: Coordinate) -> bool {
    let n = ring.len();
    if n == 0 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        if point_segment_distance(point, ring[j], ring[i]) <= EDGE_EPSILON_DEG {
            return true;
        }
        j = i;
    }
    false
}

/// Euclidean distance from a point to a segment, in degree space. Exact
/// geodesics are irrelevant at the sub-millimeter scale this is used for.
fn point_segment_distance(p: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    let (dx, dy) = (b.lon - a.lon, b.lat - a.lat);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ((p.lon - a.lon).powi(2) + (p.lat - a.lat).powi(2)).sqrt();
    }
    let t = (((p.lon - a.lon) * dx + (p.lat - a.lat) * dy) / len_sq).clamp(0.0, 1.0);
    let (cx, cy) = (a.lon + t * dx, a.lat + t * dy);
    ((p.lon - cx).powi(2) + (p.lat - cy).powi(2)).sqrt()
}

/// Check for proper intersection between non-adjacent ring edges.
///
/// O(n²) over the edges, which is fine for the vertex counts this system
/// receives. Shared endpoints between adjacent edges are not intersections.
fn self_intersects(ring: &[Coordinate]) -> bool {
    // Ignore a duplicated closing vertex so the last real edge is not
    // treated as adjacent to a zero-length one.
    let ring = if ring.len() >= 2
        && ring[0].lat == ring[ring.len() - 1].lat
        && ring[0].lon == ring[ring.len() - 1].lon
    {
        &ring[..ring.len() - 1]
    } else {
        ring
    };

    let n = ring.len();
    if n < 4 {
        return false;
    }

    for i in 0..n {
        for k in (i + 1)..n {
            // Skip adjacent edges (including the wrap-around pair).
            if k == i + 1 || (i == 0 && k == n - 1) {
                continue;
            }
            let (a1, a2) = (ring[i], ring[(i + 1) % n]);
            let (b1, b2) = (ring[k], ring[(k + 1) % n]);
            if segments_properly_intersect(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}

fn cross(o: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    (a.lon - o.lon) * (b.lat - o.lat) - (a.lat - o.lat) * (b.lon - o.lon)
}

/// True if segments (a1,a2) and (b1,b2) cross at an interior point of both.
fn segments_properly_intersect(a1: Coordinate, a2: Coordinate, b1: Coordinate, b2: Coordinate) -> bool {
    let d1 = cross(a1, a2, b1);
    let d2 = cross(a1, a2, b2);
    let d3 = cross(b1, b2, a1);
    let d4 = cross(b1, b2, a2);
    (d1 * d2 < 0.0) && (d3 * d4 < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(35.0, 139.0),
            Coordinate::new(35.0, 139.001),
            Coordinate::new(35.001, 139.001),
            Coordinate::new(35.001, 139.0),
            Coordinate::new(35.0, 139.0),
        ]
    }

    #[test]
    fn test_bounding_box() {
        let bbox = bounding_box(&square());
        assert_eq!(bbox.min_lat, 35.0);
        assert_eq!(bbox.max_lat, 35.001);
        assert_eq!(bbox.min_lon, 139.0);
        assert_eq!(bbox.max_lon, 139.001);
        approx::assert_relative_eq!(bbox.center_lat(), 35.0005);
    }

    #[test]
    fn test_contains_interior_and_exterior() {
        let ring = square();
        assert!(contains(&ring, Coordinate::new(35.0005, 139.0005)));
        assert!(!contains(&ring, Coordinate::new(35.002, 139.0005)));
        assert!(!contains(&ring, Coordinate::new(35.0005, 138.999)));
    }

    #[test]
    fn test_contains_concave_polygon() {
        // L-shape: the notch in the upper-right is outside
        let ring = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 2.0),
            Coordinate::new(1.0, 2.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 1.0),
            Coordinate::new(2.0, 0.0),
            Coordinate::new(0.0, 0.0),
        ];
        assert!(contains(&ring, Coordinate::new(0.5, 0.5)));
        assert!(contains(&ring, Coordinate::new(0.5, 1.5)));
        assert!(contains(&ring, Coordinate::new(1.5, 0.5)));
        assert!(!contains(&ring, Coordinate::new(1.5, 1.5)));
    }

    #[test]
    fn test_contains_empty_ring_is_false() {
        assert!(!contains(&[], Coordinate::new(35.0, 139.0)));
        assert!(!covers(&[], Coordinate::new(35.0, 139.0)));
    }

    #[test]
    fn test_covers_includes_boundary() {
        let ring = square();
        // Vertices and edge midpoints are on the boundary
        assert!(covers(&ring, Coordinate::new(35.0, 139.0)));
        assert!(covers(&ring, Coordinate::new(35.0, 139.0005)));
        assert!(covers(&ring, Coordinate::new(35.001, 139.0005)));
        // Interior still covered, clearly-outside still rejected
        assert!(covers(&ring, Coordinate::new(35.0005, 139.0005)));
        assert!(!covers(&ring, Coordinate::new(35.002, 139.0005)));
        // Strict containment drops the boundary
        assert!(!contains(&ring, Coordinate::new(35.001, 139.0005)));
    }

    #[test]
    fn test_validate_accepts_square() {
        assert!(validate_ring(&square()).is_ok());
    }

    #[test]
    fn test_validate_rejects_short_ring() {
        let ring = vec![
            Coordinate::new(35.0, 139.0),
            Coordinate::new(35.001, 139.001),
            Coordinate::new(35.0, 139.001),
        ];
        assert!(matches!(
            validate_ring(&ring),
            Err(GridError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_validate_rejects_degenerate_ring() {
        let ring = vec![
            Coordinate::new(35.0, 139.0),
            Coordinate::new(35.0, 139.001),
            Coordinate::new(35.0, 139.002),
            Coordinate::new(35.0, 139.0),
        ];
        assert!(matches!(
            validate_ring(&ring),
            Err(GridError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bowtie() {
        // Edges (0-1) and (2-3) cross in the middle
        let ring = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(0.0, 0.0),
        ];
        assert!(matches!(
            validate_ring(&ring),
            Err(GridError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nan_vertex() {
        let mut ring = square();
        ring[1] = Coordinate::new(f64::NAN, 139.001);
        assert!(validate_ring(&ring).is_err());
    }
}
