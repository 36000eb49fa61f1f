//! Interior quality points with deterministic jitter.

use prism_math::{dist_to_segment, point_in_polygon, Bounds, Point2};
use rand::Rng;

/// Fraction of the grid spacing an interior point must keep from every
/// boundary edge.
const EDGE_CLEARANCE: f64 = 0.15;

/// Jitter amplitude as a fraction of the grid spacing (full width).
const JITTER: f64 = 0.05;

/// Densest interior grid; higher densities are clamped to this.
pub const MAX_DENSITY: u32 = 20;

/// Seed for interior point jitter, derived from the boundary extent.
///
/// Identical outlines always produce identical seeds, so cap meshes are
/// reproducible.
pub fn jitter_seed(bounds: &Bounds) -> u64 {
    if bounds.is_empty() {
        return 0;
    }
    let seed = (bounds.width().abs() * 1000.0 + bounds.height().abs() * 1000.0).round();
    if seed.is_finite() && seed >= 0.0 {
        seed as u64
    } else {
        0
    }
}

/// Place interior points on a regular grid inside `polygon`.
///
/// The grid spacing is `max_dim / (density + 1)` with a half-spacing
/// margin, with `density` capped at [`MAX_DENSITY`]. Candidates outside
/// the polygon or closer than 15% of the spacing to any edge are skipped;
/// survivors get a small jitter drawn from `rng` (x first, then y) to
/// break grid symmetry.
pub fn interior_points<R: Rng>(
    polygon: &[Point2],
    density: u32,
    bounds: &Bounds,
    rng: &mut R,
) -> Vec<Point2> {
    let density = density.min(MAX_DENSITY);
    let spacing = bounds.max_dimension() / (density as f64 + 1.0);
    if !spacing.is_finite() || spacing <= 0.0 || polygon.len() < 3 {
        return Vec::new();
    }
    let margin = spacing * 0.5;
    let clearance = spacing * EDGE_CLEARANCE;
    let n = polygon.len();

    let mut points = Vec::new();
    let mut x = bounds.min_x + margin;
    while x < bounds.max_x - margin * 0.5 {
        let mut y = bounds.min_y + margin;
        while y < bounds.max_y - margin * 0.5 {
            let candidate = Point2::new(x, y);
            y += spacing;

            if !point_in_polygon(&candidate, polygon) {
                continue;
            }
            let too_close = (0..n)
                .any(|i| dist_to_segment(&candidate, &polygon[i], &polygon[(i + 1) % n]) < clearance);
            if too_close {
                continue;
            }

            let jx = (rng.gen::<f64>() - 0.5) * spacing * JITTER;
            let jy = (rng.gen::<f64>() - 0.5) * spacing * JITTER;
            points.push(Point2::new(candidate.x + jx, candidate.y + jy));
        }
        x += spacing;
    }

    points
}
