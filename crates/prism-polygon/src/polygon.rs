//! Closed boundary polygon type.

use prism_math::{signed_area, Point2};

use crate::PolygonError;

/// A closed 2D boundary polygon.
///
/// The last point implicitly connects back to the first. Polygons produced
/// by [`sanitize`](crate::sanitize) are counter-clockwise, free of
/// consecutive near-duplicates, and centered on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point2>,
}

impl Polygon {
    /// Create a polygon from an ordered point list.
    ///
    /// Only the point count is checked; use [`sanitize`](crate::sanitize)
    /// for full cleanup.
    pub fn new(points: Vec<Point2>) -> Result<Self, PolygonError> {
        if points.len() < 3 {
            return Err(PolygonError::TooFewPoints(points.len()));
        }
        Ok(Self { points })
    }

    /// The boundary points in traversal order.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed polygon; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area. Positive for counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }
}
