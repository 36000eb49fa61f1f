#![warn(missing_docs)]

//! Cap triangulation for the prism extrusion pipeline.
//!
//! The pipeline treats triangulation as a capability: anything that
//! implements [`Triangulator`] can fill a counter-clockwise boundary with
//! triangles, optionally using extra interior points. Two backends ship
//! with the crate:
//!
//! - [`DelaunayTriangulator`]: constrained Delaunay triangulation that
//!   honours interior (Steiner) points for better-shaped triangles
//! - [`EarClipTriangulator`]: boundary-only ear clipping
//!
//! [`triangulate_cap`] wraps a backend with deterministic interior point
//! placement and a single retry without interior points.
//!
//! # Example
//!
//! ```
//! use prism_math::{Bounds, Point2};
//! use prism_tessellate::{triangulate_cap, DelaunayTriangulator};
//!
//! let square = vec![
//!     Point2::new(-5.0, -5.0),
//!     Point2::new(5.0, -5.0),
//!     Point2::new(5.0, 5.0),
//!     Point2::new(-5.0, 5.0),
//! ];
//! let bounds = Bounds::from_points(&square);
//! let cap = triangulate_cap(&DelaunayTriangulator, &square, 5, &bounds).unwrap();
//! assert!(cap.num_triangles() >= 2);
//! ```

mod cap;
mod delaunay;
mod earclip;
mod interior;
mod mesh;

pub use cap::triangulate_cap;
pub use delaunay::DelaunayTriangulator;
pub use earclip::EarClipTriangulator;
pub use interior::{interior_points, jitter_seed, MAX_DENSITY};
pub use mesh::CapMesh;

use prism_math::Point2;
use thiserror::Error;

/// Errors from a triangulation backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulationError {
    /// The boundary has fewer than three vertices.
    #[error("boundary needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// A vertex could not be inserted (non-finite or out of range).
    #[error("vertex insertion failed: {0}")]
    Insertion(String),

    /// Two boundary vertices coincide.
    #[error("boundary contains coincident vertices")]
    CoincidentVertices,

    /// Boundary edges cross each other.
    #[error("boundary edge {0} intersects another boundary edge")]
    SelfIntersecting(usize),

    /// Ear clipping ran out of ears before finishing.
    #[error("no ear found with {0} vertices remaining")]
    NoEar(usize),

    /// The backend produced no triangles.
    #[error("triangulation produced no triangles")]
    Empty,

    /// The backend produced inconsistent buffers.
    #[error("malformed cap mesh: {0}")]
    Malformed(String),
}

/// A backend able to fill a closed boundary with triangles.
///
/// Implementations must:
/// - emit every boundary vertex, in order and unmoved, as the first
///   vertices of the returned [`CapMesh`]
/// - wind every triangle counter-clockwise in the z-up plane
/// - only cover the inside of the boundary
///
/// `interior` holds optional quality points strictly inside the boundary;
/// a backend that cannot use them may ignore them.
pub trait Triangulator: Send + Sync {
    /// Triangulate a counter-clockwise boundary.
    fn triangulate(
        &self,
        boundary: &[Point2],
        interior: &[Point2],
    ) -> Result<CapMesh, TriangulationError>;

    /// Short backend name used in log output.
    fn name(&self) -> &'static str;
}
