//! Constrained Delaunay backend built on `spade`.

use std::collections::VecDeque;

use prism_math::{point_in_polygon, Point2};
use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint, Triangulation};

use crate::{CapMesh, Triangulator, TriangulationError};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint<f64>>;

/// Constrained Delaunay triangulation of the boundary.
///
/// Boundary edges are inserted as constraints, interior points as free
/// vertices, and the triangles falling outside the boundary (the convex
/// hull fill) are discarded by flood-filling across constraint edges.
/// Interior points outside the boundary are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunayTriangulator;

impl Triangulator for DelaunayTriangulator {
    fn triangulate(
        &self,
        boundary: &[Point2],
        interior: &[Point2],
    ) -> Result<CapMesh, TriangulationError> {
        let n = boundary.len();
        if n < 3 {
            return Err(TriangulationError::TooFewVertices(n));
        }

        let mut cdt = Cdt::new();
        let mut handles: Vec<FixedVertexHandle> = Vec::with_capacity(n);
        for p in boundary {
            handles.push(insert(&mut cdt, p)?);
        }
        // spade merges coincident insertions into one vertex
        if cdt.num_vertices() != n {
            return Err(TriangulationError::CoincidentVertices);
        }

        for i in 0..n {
            let (from, to) = (handles[i], handles[(i + 1) % n]);
            if !cdt.can_add_constraint(from, to) {
                return Err(TriangulationError::SelfIntersecting(i));
            }
            cdt.add_constraint(from, to);
        }

        for p in interior.iter().filter(|p| point_in_polygon(p, boundary)) {
            insert(&mut cdt, p)?;
        }

        // Vertex indices follow insertion order: boundary first, then interior
        let mut vertices = Vec::with_capacity(cdt.num_vertices() * 2);
        for v in cdt.vertices() {
            let pos = v.position();
            vertices.push(pos.x);
            vertices.push(pos.y);
        }

        let inside = classify_faces(&cdt);
        let mut indices = Vec::with_capacity(cdt.num_inner_faces() * 3);
        // spade reports inner faces counter-clockwise
        for face in cdt.inner_faces() {
            if !inside[face.fix().index()] {
                continue;
            }
            let [a, b, c] = face.vertices();
            indices.extend_from_slice(&[
                a.fix().index() as u32,
                b.fix().index() as u32,
                c.fix().index() as u32,
            ]);
        }

        if indices.is_empty() {
            return Err(TriangulationError::Empty);
        }
        CapMesh::new(vertices, indices)
    }

    fn name(&self) -> &'static str {
        "delaunay"
    }
}

/// Mark each face inside or outside the constrained boundary.
///
/// Flood fill from the convex hull: faces next to the outer face start
/// inside only if that hull edge is a constraint, and crossing a
/// constraint edge flips the state. Indexed by face index.
fn classify_faces(cdt: &Cdt) -> Vec<bool> {
    let mut state: Vec<Option<bool>> = vec![None; cdt.num_all_faces()];
    let mut queue: VecDeque<FixedFaceHandle<InnerTag>> = VecDeque::new();

    for face in cdt.inner_faces() {
        let idx = face.fix().index();
        for edge in face.adjacent_edges() {
            if edge.rev().face().is_outer() && state[idx].is_none() {
                state[idx] = Some(edge.is_constraint_edge());
                queue.push_back(face.fix());
            }
        }
    }

    while let Some(fixed) = queue.pop_front() {
        let inside = state[fixed.index()] == Some(true);
        for edge in cdt.face(fixed).adjacent_edges() {
            if let Some(neighbor) = edge.rev().face().as_inner() {
                let idx = neighbor.fix().index();
                if state[idx].is_none() {
                    state[idx] = Some(inside != edge.is_constraint_edge());
                    queue.push_back(neighbor.fix());
                }
            }
        }
    }

    state.into_iter().map(|s| s == Some(true)).collect()
}

fn insert(cdt: &mut Cdt, p: &Point2) -> Result<FixedVertexHandle, TriangulationError> {
    cdt.insert(SpadePoint::new(p.x, p.y))
        .map_err(|e| TriangulationError::Insertion(format!("({}, {}): {e:?}", p.x, p.y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::signed_area;

    fn square(half: f64) -> Vec<Point2> {
        vec![
            Point2::new(-half, -half),
            Point2::new(half, -half),
            Point2::new(half, half),
            Point2::new(-half, half),
        ]
    }

    fn assert_ccw(mesh: &CapMesh) {
        for [a, b, c] in mesh.triangles() {
            let tri = [
                mesh.vertex(a as usize),
                mesh.vertex(b as usize),
                mesh.vertex(c as usize),
            ];
            assert!(signed_area(&tri) > 0.0, "triangle {a},{b},{c} is not CCW");
        }
    }

    #[test]
    fn test_square_boundary_only() {
        let mesh = DelaunayTriangulator.triangulate(&square(5.0), &[]).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 2);
        assert!((mesh.area() - 100.0).abs() < 1e-9);
        assert_ccw(&mesh);
    }

    #[test]
    fn test_boundary_vertices_first_and_unmoved() {
        let boundary = square(5.0);
        let interior = vec![Point2::new(0.5, -0.25)];
        let mesh = DelaunayTriangulator
            .triangulate(&boundary, &interior)
            .unwrap();
        assert_eq!(mesh.num_vertices(), 5);
        for (i, p) in boundary.iter().enumerate() {
            assert_eq!(mesh.vertex(i), *p);
        }
        assert_eq!(mesh.vertex(4), interior[0]);
        assert_eq!(mesh.num_triangles(), 4);
        assert_ccw(&mesh);
    }

    #[test]
    fn test_concave_outline_not_filled_outside() {
        let l_shape = vec![
            Point2::new(0.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(6.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let mesh = DelaunayTriangulator.triangulate(&l_shape, &[]).unwrap();
        // 6*4 + 4*6 = 48
        assert!((mesh.area() - 48.0).abs() < 1e-9);
        assert_eq!(mesh.num_triangles(), 4);
        assert_ccw(&mesh);
    }

    #[test]
    fn test_subdivided_circle_has_no_slivers() {
        // Subdivision puts collinear points on every chord, where a
        // centroid test would keep hull slivers
        let circle: Vec<Point2> = (0..97)
            .map(|i| {
                let t = i as f64 / 97.0 * std::f64::consts::TAU;
                Point2::new(50.0 * t.cos(), 50.0 * t.sin())
            })
            .collect();
        let polygon = prism_polygon::sanitize(&circle, 0.5).unwrap();
        let boundary = prism_polygon::subdivide(polygon.points(), 2);
        assert_eq!(boundary.len(), 194);

        let mesh = DelaunayTriangulator.triangulate(&boundary, &[]).unwrap();
        assert_eq!(mesh.num_vertices(), 194);
        assert_eq!(mesh.num_triangles(), 192);
        assert!((mesh.area() - signed_area(&boundary)).abs() < 1e-6);
    }

    #[test]
    fn test_subdivided_concave_with_interior() {
        let l_shape = vec![
            Point2::new(0.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(6.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let boundary = prism_polygon::subdivide(&l_shape, 3);
        let interior = vec![Point2::new(2.0, 2.0), Point2::new(2.0, 7.0)];
        let mesh = DelaunayTriangulator
            .triangulate(&boundary, &interior)
            .unwrap();
        // Euler: n + 2h - 2 triangles for n boundary and h interior vertices
        assert_eq!(mesh.num_triangles(), boundary.len() + 2 * interior.len() - 2);
        assert!((mesh.area() - 48.0).abs() < 1e-9);
        assert_ccw(&mesh);
    }

    #[test]
    fn test_interior_points_outside_ignored() {
        let mesh = DelaunayTriangulator
            .triangulate(&square(5.0), &[Point2::new(50.0, 50.0)])
            .unwrap();
        assert_eq!(mesh.num_vertices(), 4);
    }

    #[test]
    fn test_self_intersecting_rejected() {
        // Bow tie
        let bow_tie = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        ];
        let result = DelaunayTriangulator.triangulate(&bow_tie, &[]);
        assert!(matches!(result, Err(TriangulationError::SelfIntersecting(_))));
    }

    #[test]
    fn test_coincident_vertices_rejected() {
        let boundary = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 10.0),
        ];
        let result = DelaunayTriangulator.triangulate(&boundary, &[]);
        assert_eq!(result, Err(TriangulationError::CoincidentVertices));
    }

    #[test]
    fn test_too_few_vertices() {
        let result = DelaunayTriangulator.triangulate(&square(1.0)[..2], &[]);
        assert_eq!(result, Err(TriangulationError::TooFewVertices(2)));
    }
}
