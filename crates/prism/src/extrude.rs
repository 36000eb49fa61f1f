//! The outline-to-solid pipeline.

use prism_math::{Bounds, Point2};
use prism_mesh::{assemble, merge, ExtrudedMesh};
use prism_polygon::{sanitize, subdivide, validate_points};
use prism_tessellate::{triangulate_cap, DelaunayTriangulator, Triangulator};

use crate::source::svg_contours;
use crate::{ExtrudeError, ExtrudeOptions, SourceError};

/// What to extrude.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtrudeInput {
    /// A single outline, in drawing order.
    Points(Vec<Point2>),
    /// A base64-encoded SVG document, optionally as a `data:` URI.
    Svg(String),
}

/// Extrude an input with the constrained Delaunay backend.
///
/// Returns `Ok(None)` when nothing usable comes out: too few or
/// degenerate points, an SVG without contours, or caps that cannot be
/// triangulated. Only a malformed SVG payload is an error.
pub fn extrude(
    input: &ExtrudeInput,
    options: &ExtrudeOptions,
) -> Result<Option<ExtrudedMesh>, SourceError> {
    extrude_with(&DelaunayTriangulator, input, options)
}

/// Extrude an input with a chosen triangulation backend.
///
/// SVG inputs are split into contours that are extruded independently
/// and merged in document order; contours that fail are skipped.
pub fn extrude_with<T: Triangulator + ?Sized>(
    triangulator: &T,
    input: &ExtrudeInput,
    options: &ExtrudeOptions,
) -> Result<Option<ExtrudedMesh>, SourceError> {
    match input {
        ExtrudeInput::Points(points) => Ok(extrude_contours(
            triangulator,
            std::slice::from_ref(points),
            options,
        )),
        ExtrudeInput::Svg(data) => {
            let contours = svg_contours(data).map_err(|e| {
                log::error!("SVG parsing failed: {e}");
                e
            })?;
            Ok(extrude_contours(triangulator, &contours, options))
        }
    }
}

/// Extrude several outlines and merge the results.
///
/// `None` if no outline produced a mesh.
pub fn extrude_contours<T: Triangulator + ?Sized>(
    triangulator: &T,
    contours: &[Vec<Point2>],
    options: &ExtrudeOptions,
) -> Option<ExtrudedMesh> {
    let meshes = contours
        .iter()
        .enumerate()
        .filter_map(
            |(i, contour)| match extrude_contour(triangulator, contour, options) {
                Ok(mesh) => Some(mesh),
                Err(e) => {
                    log::debug!("skipping contour {i} ({} points): {e}", contour.len());
                    None
                }
            },
        )
        .collect();
    merge(meshes)
}

/// Extrude one outline, reporting why it failed if it does.
///
/// Runs the full pipeline: validation, dedup with `options.epsilon`,
/// counter-clockwise winding, centering on the mean, edge subdivision,
/// cap triangulation with one retry, and buffer assembly. Options are
/// normalized first.
pub fn extrude_contour<T: Triangulator + ?Sized>(
    triangulator: &T,
    points: &[Point2],
    options: &ExtrudeOptions,
) -> Result<ExtrudedMesh, ExtrudeError> {
    let opts = options.normalized();

    validate_points(points)?;
    let polygon = sanitize(points, opts.epsilon)?;
    log::debug!(
        "outline sanitized to {} points, area {:.3}",
        polygon.len(),
        polygon.signed_area()
    );

    let boundary = subdivide(polygon.points(), opts.edge_subdivisions as usize);
    let bounds = Bounds::from_points(&boundary);

    let cap = triangulate_cap(triangulator, &boundary, opts.cap_density, &bounds)
        .ok_or(ExtrudeError::Triangulation)?;

    Ok(assemble(&boundary, &cap, opts.depth, opts.depth_segments))
}
