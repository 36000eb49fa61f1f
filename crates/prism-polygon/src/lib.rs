#![warn(missing_docs)]

//! Outline preparation for the prism extrusion pipeline.
//!
//! Turns raw, possibly hand-drawn point sequences into clean boundary
//! polygons: near-duplicate removal, counter-clockwise winding,
//! centering about the origin, Douglas-Peucker simplification and
//! even edge subdivision.
//!
//! # Example
//!
//! ```
//! use prism_math::Point2;
//! use prism_polygon::{sanitize, subdivide};
//!
//! // A clockwise square, drawn off-center
//! let raw = vec![
//!     Point2::new(100.0, 100.0),
//!     Point2::new(100.0, 200.0),
//!     Point2::new(200.0, 200.0),
//!     Point2::new(200.0, 100.0),
//! ];
//!
//! let polygon = sanitize(&raw, 0.5).unwrap();
//! assert!(polygon.signed_area() > 0.0);
//!
//! let boundary = subdivide(polygon.points(), 2);
//! assert_eq!(boundary.len(), 8);
//! ```

mod polygon;
mod sanitize;
mod simplify;
mod subdivide;

pub use polygon::Polygon;
pub use sanitize::{center, dedup_points, ensure_ccw, sanitize, validate_points};
pub use simplify::simplify;
pub use subdivide::subdivide;

use thiserror::Error;

/// Errors from outline preparation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolygonError {
    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate at point {0}")]
    NonFinite(usize),

    /// Fewer than three usable points remain.
    #[error("need at least 3 distinct points, got {0}")]
    TooFewPoints(usize),

    /// The outline encloses no area (all points collinear or coincident).
    #[error("polygon has zero area")]
    ZeroArea,
}
