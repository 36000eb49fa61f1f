//! Even subdivision of boundary edges.

use prism_math::Point2;

/// Split every boundary edge into `per_edge` equal pieces.
///
/// Returns exactly `points.len() * per_edge` points in traversal order.
/// Each edge emits its start point followed by the interior split points;
/// the end point is emitted as the start of the next edge, and the closing
/// edge from the last point back to the first is included. A factor of
/// 0 or 1 returns a copy of the input.
pub fn subdivide(points: &[Point2], per_edge: usize) -> Vec<Point2> {
    if per_edge <= 1 {
        return points.to_vec();
    }

    let n = points.len();
    let mut result = Vec::with_capacity(n * per_edge);
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        result.push(a);
        for s in 1..per_edge {
            let t = s as f64 / per_edge as f64;
            result.push(Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(size: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]
    }

    #[test]
    fn test_factor_one_is_copy() {
        let pts = unit_square(10.0);
        assert_eq!(subdivide(&pts, 1), pts);
        assert_eq!(subdivide(&pts, 0), pts);
    }

    #[test]
    fn test_cardinality() {
        let pts = unit_square(1.0);
        assert_eq!(subdivide(&pts, 3).len(), 12);
        assert_eq!(subdivide(&pts, 7).len(), 28);
    }

    #[test]
    fn test_intermediate_positions() {
        let result = subdivide(&unit_square(3.0), 3);
        assert_eq!(result[0], Point2::new(0.0, 0.0));
        assert!((result[1].x - 1.0).abs() < 1e-12 && result[1].y.abs() < 1e-12);
        assert!((result[2].x - 2.0).abs() < 1e-12 && result[2].y.abs() < 1e-12);
        // Start of the second edge is the original corner
        assert_eq!(result[3], Point2::new(3.0, 0.0));
    }

    #[test]
    fn test_wrap_edge_subdivided() {
        let result = subdivide(&unit_square(2.0), 2);
        // Midpoint of the closing edge (0,2) -> (0,0)
        let last = result[result.len() - 1];
        assert!(last.x.abs() < 1e-12);
        assert!((last.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_preserves_winding() {
        let pts = unit_square(5.0);
        let area_before = prism_math::signed_area(&pts);
        let area_after = prism_math::signed_area(&subdivide(&pts, 4));
        assert!((area_before - area_after).abs() < 1e-9);
    }
}
