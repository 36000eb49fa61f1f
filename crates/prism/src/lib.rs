#![warn(missing_docs)]

//! prism: extrude 2D outlines into closed 3D solids.
//!
//! An outline (a point list or the contours of an SVG document) becomes a
//! front cap, a back cap and side walls, packed into flat position, normal
//! and index buffers ready for upload to a renderer.
//!
//! Degenerate input never panics: it simply yields no mesh.
//!
//! # Example
//!
//! ```
//! use prism::{extrude, ExtrudeInput, ExtrudeOptions, Point2};
//!
//! let outline = vec![
//!     Point2::new(100.0, 100.0),
//!     Point2::new(200.0, 100.0),
//!     Point2::new(200.0, 200.0),
//!     Point2::new(100.0, 200.0),
//! ];
//!
//! let options = ExtrudeOptions { depth: 10.0, ..Default::default() };
//! let mesh = extrude(&ExtrudeInput::Points(outline), &options)
//!     .unwrap()
//!     .expect("a square extrudes");
//!
//! let (min, max) = mesh.bounding_box().unwrap();
//! assert!((max[2] - min[2] - 10.0).abs() < 1e-5);
//! ```

mod error;
mod extrude;
mod options;
pub mod source;

pub use error::{ExtrudeError, OptionsError, SourceError};
pub use extrude::{extrude, extrude_contour, extrude_contours, extrude_with, ExtrudeInput};
pub use options::{ExtrudeOptions, MAX_CAP_DENSITY, MIN_CAP_DENSITY};

pub use prism_math::{Bounds, Point2};
pub use prism_mesh::{assemble, merge, ExtrudedMesh, IndexBuffer, MeshLayout};
pub use prism_polygon::{sanitize, simplify, subdivide, Polygon, PolygonError};
pub use prism_tessellate::{
    triangulate_cap, CapMesh, DelaunayTriangulator, EarClipTriangulator, TriangulationError,
    Triangulator,
};
