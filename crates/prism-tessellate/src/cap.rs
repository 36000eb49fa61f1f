//! Cap triangulation with deterministic interior points and one retry.

use prism_math::{Bounds, Point2};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::interior::{interior_points, jitter_seed};
use crate::{CapMesh, Triangulator, TriangulationError};

/// Triangulate a counter-clockwise boundary into a cap mesh.
///
/// With `density > 1`, interior quality points are placed on a jittered
/// grid seeded from `bounds` and passed to the backend. If that attempt
/// fails (or yields no triangles) it is retried once with no interior
/// points. Returns `None` when the boundary-only attempt fails too.
pub fn triangulate_cap<T: Triangulator + ?Sized>(
    triangulator: &T,
    boundary: &[Point2],
    density: u32,
    bounds: &Bounds,
) -> Option<CapMesh> {
    let interior = if density > 1 {
        let mut rng = StdRng::seed_from_u64(jitter_seed(bounds));
        interior_points(boundary, density, bounds, &mut rng)
    } else {
        Vec::new()
    };

    let result = match attempt(triangulator, boundary, &interior) {
        Ok(mesh) => return Some(mesh),
        Err(e) if !interior.is_empty() => {
            log::warn!(
                "{} triangulation failed with {} interior points ({e}), retrying without them",
                triangulator.name(),
                interior.len()
            );
            attempt(triangulator, boundary, &[])
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(mesh) => Some(mesh),
        Err(e) => {
            log::error!(
                "{} triangulation failed completely for {} boundary points: {e}",
                triangulator.name(),
                boundary.len()
            );
            None
        }
    }
}

fn attempt<T: Triangulator + ?Sized>(
    triangulator: &T,
    boundary: &[Point2],
    interior: &[Point2],
) -> Result<CapMesh, TriangulationError> {
    let mesh = triangulator.triangulate(boundary, interior)?;
    if mesh.is_empty() {
        return Err(TriangulationError::Empty);
    }
    log::debug!(
        "{} cap: {} vertices, {} triangles ({} interior points offered)",
        triangulator.name(),
        mesh.num_vertices(),
        mesh.num_triangles(),
        interior.len()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DelaunayTriangulator, EarClipTriangulator};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn square(half: f64) -> Vec<Point2> {
        vec![
            Point2::new(-half, -half),
            Point2::new(half, -half),
            Point2::new(half, half),
            Point2::new(-half, half),
        ]
    }

    /// Fails whenever interior points are offered.
    #[derive(Default)]
    struct RejectsInterior {
        calls: AtomicUsize,
    }

    impl Triangulator for RejectsInterior {
        fn triangulate(
            &self,
            boundary: &[Point2],
            interior: &[Point2],
        ) -> Result<CapMesh, TriangulationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !interior.is_empty() {
                return Err(TriangulationError::Insertion("stub".into()));
            }
            EarClipTriangulator.triangulate(boundary, interior)
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    /// Always fails.
    #[derive(Default)]
    struct AlwaysFails {
        calls: AtomicUsize,
    }

    impl Triangulator for AlwaysFails {
        fn triangulate(&self, _: &[Point2], _: &[Point2]) -> Result<CapMesh, TriangulationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TriangulationError::Empty)
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_interior_points_added() {
        let boundary = square(50.0);
        let bounds = Bounds::from_points(&boundary);
        let cap = triangulate_cap(&DelaunayTriangulator, &boundary, 5, &bounds).unwrap();
        assert!(cap.num_vertices() > boundary.len());
        assert!((cap.area() - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_density_one_is_boundary_only() {
        let boundary = square(50.0);
        let bounds = Bounds::from_points(&boundary);
        let cap = triangulate_cap(&DelaunayTriangulator, &boundary, 1, &bounds).unwrap();
        assert_eq!(cap.num_vertices(), 4);
        assert_eq!(cap.num_triangles(), 2);
    }

    #[test]
    fn test_retry_without_interior_points() {
        let boundary = square(50.0);
        let bounds = Bounds::from_points(&boundary);
        let stub = RejectsInterior::default();
        let cap = triangulate_cap(&stub, &boundary, 5, &bounds).unwrap();
        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cap.num_vertices(), 4);
    }

    #[test]
    fn test_total_failure_is_none() {
        let boundary = square(50.0);
        let bounds = Bounds::from_points(&boundary);
        let failing = AlwaysFails::default();
        assert!(triangulate_cap(&failing, &boundary, 5, &bounds).is_none());
        assert_eq!(failing.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_deterministic() {
        let boundary = prism_polygon::subdivide(&square(37.5), 3);
        let bounds = Bounds::from_points(&boundary);
        let a = triangulate_cap(&DelaunayTriangulator, &boundary, 7, &bounds).unwrap();
        let b = triangulate_cap(&DelaunayTriangulator, &boundary, 7, &bounds).unwrap();
        assert_eq!(a, b);
    }
}
