#![warn(missing_docs)]

//! Math types for the prism extrusion pipeline.
//!
//! Thin wrappers around nalgebra providing the 2D types the pipeline
//! works in (points), axis-aligned bounds, the flat-area tolerance
//! and a handful of planar predicates shared by the polygon and
//! tessellation crates.

/// A point in the 2D outline plane.
pub type Point2 = nalgebra::Point2<f64>;

/// Axis-aligned bounding box of a 2D point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest x coordinate.
    pub min_x: f64,
    /// Smallest y coordinate.
    pub min_y: f64,
    /// Largest x coordinate.
    pub max_x: f64,
    /// Largest y coordinate.
    pub max_y: f64,
}

impl Bounds {
    /// An inverted box that any point will grow.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Compute the bounds of a point set.
    ///
    /// An empty slice yields [`Bounds::EMPTY`].
    pub fn from_points(points: &[Point2]) -> Self {
        points.iter().fold(Self::EMPTY, |mut b, p| {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
            b
        })
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The larger of width and height.
    pub fn max_dimension(&self) -> f64 {
        self.width().max(self.height())
    }

    /// True if no point has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// Absolute shoelace area at or below which an outline counts as flat.
pub const AREA_TOLERANCE: f64 = 1e-12;

/// Signed area of a closed polygon via the shoelace formula.
///
/// Positive for counter-clockwise, negative for clockwise.
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

/// Minimum distance from `p` to the segment `[a, b]`.
///
/// A zero-length segment degrades to the distance from `p` to `a`.
pub fn dist_to_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Ray-casting point-in-polygon test.
///
/// Works for either winding; points exactly on an edge may land on
/// either side.
pub fn point_in_polygon(p: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
