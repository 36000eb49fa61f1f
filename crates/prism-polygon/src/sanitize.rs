//! Point sanitizing: dedup, winding correction and centering.

use prism_math::{signed_area, Point2, AREA_TOLERANCE};

use crate::{Polygon, PolygonError};

/// Clean a raw outline into an extrudable polygon.
///
/// Drops consecutive points within `epsilon` of the previously kept point
/// (and a trailing point within `epsilon` of the first), forces
/// counter-clockwise winding and translates the result so its vertex
/// centroid sits at the origin. The input is left untouched.
///
/// # Errors
///
/// - [`PolygonError::NonFinite`] if any coordinate is NaN or infinite
/// - [`PolygonError::TooFewPoints`] if fewer than 3 points survive dedup
/// - [`PolygonError::ZeroArea`] if the remaining points enclose no area
pub fn sanitize(points: &[Point2], epsilon: f64) -> Result<Polygon, PolygonError> {
    check_finite(points)?;

    let deduped = dedup_points(points, epsilon);
    if deduped.len() < 3 {
        return Err(PolygonError::TooFewPoints(deduped.len()));
    }

    if signed_area(&deduped).abs() <= AREA_TOLERANCE {
        return Err(PolygonError::ZeroArea);
    }

    let ccw = ensure_ccw(&deduped);
    Polygon::new(center(&ccw))
}

/// Validate raw input before any processing.
///
/// Rejects sequences shorter than 3 points and non-finite coordinates.
pub fn validate_points(points: &[Point2]) -> Result<(), PolygonError> {
    if points.len() < 3 {
        return Err(PolygonError::TooFewPoints(points.len()));
    }
    check_finite(points)
}

fn check_finite(points: &[Point2]) -> Result<(), PolygonError> {
    match points
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        Some(i) => Err(PolygonError::NonFinite(i)),
        None => Ok(()),
    }
}

/// Remove consecutive near-duplicate points, including a last point that
/// wraps onto the first.
///
/// A point is a duplicate when its distance to the previously kept point is
/// at most `epsilon`. First occurrences win.
pub fn dedup_points(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let eps_sq = epsilon * epsilon;

    let mut result = Vec::with_capacity(points.len());
    result.push(first);
    for p in &points[1..] {
        // result is never empty here
        let prev = result[result.len() - 1];
        if (p - prev).norm_squared() > eps_sq {
            result.push(*p);
        }
    }

    if result.len() > 1 {
        let last = result[result.len() - 1];
        if (last - first).norm_squared() <= eps_sq {
            result.pop();
        }
    }

    result
}

/// Return the points in counter-clockwise order.
///
/// Clockwise input (negative shoelace area) is reversed; anything else is
/// copied unchanged.
pub fn ensure_ccw(points: &[Point2]) -> Vec<Point2> {
    let mut out = points.to_vec();
    if signed_area(points) < 0.0 {
        out.reverse();
    }
    out
}

/// Translate points so their arithmetic-mean centroid is the origin.
pub fn center(points: &[Point2]) -> Vec<Point2> {
    if points.is_empty() {
        return Vec::new();
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |acc, p| (acc.0 + p.x, acc.1 + p.y));
    let (cx, cy) = (sx / n, sy / n);
    points
        .iter()
        .map(|p| Point2::new(p.x - cx, p.y - cy))
        .collect()
}
