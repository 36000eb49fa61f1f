//! Boundary-only ear-clipping backend.

use prism_math::{signed_area, Point2, AREA_TOLERANCE};

use crate::{CapMesh, Triangulator, TriangulationError};

/// Ear-clipping triangulation using only the boundary vertices.
///
/// Interior points are ignored. Straight vertices (such as the split
/// points of a subdivided edge) are kept and end up in zero-area
/// triangles. Fails with [`TriangulationError::NoEar`] when the remaining
/// polygon has no clippable ear, which happens for self-intersecting or
/// clockwise outlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarClipTriangulator;

impl Triangulator for EarClipTriangulator {
    fn triangulate(
        &self,
        boundary: &[Point2],
        _interior: &[Point2],
    ) -> Result<CapMesh, TriangulationError> {
        let n = boundary.len();
        if n < 3 {
            return Err(TriangulationError::TooFewVertices(n));
        }

        // Clockwise or flat outlines have no ears
        if signed_area(boundary) <= AREA_TOLERANCE {
            return Err(TriangulationError::NoEar(n));
        }

        let mut indices = Vec::with_capacity((n - 2) * 3);
        ear_clip(boundary, &mut indices)?;

        let vertices = boundary.iter().flat_map(|p| [p.x, p.y]).collect();
        CapMesh::new(vertices, indices)
    }

    fn name(&self) -> &'static str {
        "earclip"
    }
}

/// Clip ears off a counter-clockwise polygon until one triangle remains.
///
/// Proper ears are clipped first. When none is left, a straight vertex
/// lying between its neighbours is clipped as a zero-area triangle, which
/// keeps subdivided edges stitched to their split points.
fn ear_clip(verts: &[Point2], out: &mut Vec<u32>) -> Result<(), TriangulationError> {
    let mut remaining: Vec<usize> = (0..verts.len()).collect();

    while remaining.len() > 3 {
        let n = remaining.len();
        let i = find_ear(verts, &remaining)
            .or_else(|| find_straight(verts, &remaining))
            .ok_or(TriangulationError::NoEar(n))?;

        let (prev, next) = ((i + n - 1) % n, (i + 1) % n);
        out.extend_from_slice(&[
            remaining[prev] as u32,
            remaining[i] as u32,
            remaining[next] as u32,
        ]);
        remaining.remove(i);
    }

    let [a, b, c] = [remaining[0], remaining[1], remaining[2]];
    let (pa, pb, pc) = (&verts[a], &verts[b], &verts[c]);
    if cross(pa, pb, pc) <= 0.0 && !is_straight(pa, pb, pc) {
        return Err(TriangulationError::NoEar(3));
    }
    out.extend_from_slice(&[a as u32, b as u32, c as u32]);
    Ok(())
}

/// Position in `remaining` of a strictly convex vertex whose triangle
/// holds no other remaining vertex.
fn find_ear(verts: &[Point2], remaining: &[usize]) -> Option<usize> {
    let n = remaining.len();
    (0..n).find(|&i| {
        let (prev, next) = ((i + n - 1) % n, (i + 1) % n);
        let a = verts[remaining[prev]];
        let b = verts[remaining[i]];
        let c = verts[remaining[next]];

        if cross(&a, &b, &c) <= 0.0 || is_straight(&a, &b, &c) {
            return false;
        }
        !(0..n)
            .filter(|&j| j != prev && j != i && j != next)
            .map(|j| verts[remaining[j]])
            .filter(|p| *p != a && *p != b && *p != c)
            .any(|p| point_in_triangle(&p, &a, &b, &c))
    })
}

/// Position in `remaining` of a vertex sitting on the segment between
/// its neighbours.
fn find_straight(verts: &[Point2], remaining: &[usize]) -> Option<usize> {
    let n = remaining.len();
    (0..n).find(|&i| {
        let a = verts[remaining[(i + n - 1) % n]];
        let b = verts[remaining[i]];
        let c = verts[remaining[(i + 1) % n]];
        is_straight(&a, &b, &c)
    })
}

fn cross(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b - a).perp(&(c - a))
}

/// `b` lies on the segment `a`-`c`, up to rounding in the split points.
fn is_straight(a: &Point2, b: &Point2, c: &Point2) -> bool {
    let (ba, bc) = (a - b, c - b);
    let scale = ba.norm() * bc.norm();
    cross(a, b, c).abs() <= STRAIGHT_TOLERANCE * scale && ba.dot(&bc) < 0.0
}

/// Relative cross product under which three points count as collinear.
const STRAIGHT_TOLERANCE: f64 = 1e-9;

/// Closed point-in-triangle test using barycentric coordinates.
///
/// Points on the triangle's edges count as inside, so a vertex touching
/// the would-be diagonal blocks the ear.
fn point_in_triangle(p: &Point2, a: &Point2, b: &Point2, c: &Point2) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(&v0);
    let dot01 = v0.dot(&v1);
    let dot02 = v0.dot(&v2);
    let dot11 = v1.dot(&v1);
    let dot12 = v1.dot(&v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom == 0.0 {
        return false;
    }
    let inv_denom = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

    u >= 0.0 && v >= 0.0 && u + v <= 1.0
}
