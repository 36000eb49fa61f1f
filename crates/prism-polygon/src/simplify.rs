//! Douglas-Peucker path simplification.

use prism_math::{dist_to_segment, Point2};

/// Simplify a freehand path with the Douglas-Peucker algorithm.
///
/// Runs iteratively over an explicit stack of index ranges, so very long
/// strokes cannot overflow the call stack. Both endpoints are always kept;
/// an interior point survives when it lies more than `tolerance` from the
/// chord of the range being examined. Ties resolve to the lowest index,
/// which keeps the kept set deterministic.
///
/// Inputs of two points or fewer are returned unchanged.
pub fn simplify(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0usize, n - 1)];
    while let Some((start, end)) = stack.pop() {
        if end - start <= 1 {
            continue;
        }

        let first = &points[start];
        let last = &points[end];
        let mut max_dist = 0.0;
        let mut max_idx = start;
        for (i, p) in points.iter().enumerate().take(end).skip(start + 1) {
            let d = dist_to_segment(p, first, last);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }

        if max_dist > tolerance {
            keep[max_idx] = true;
            stack.push((start, max_idx));
            stack.push((max_idx, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collinear_collapses_to_endpoints() {
        let line: Vec<_> = (0..10).map(|i| Point2::new(i as f64 * 10.0, 0.0)).collect();
        let result = simplify(&line, 1.0);
        assert_eq!(result, vec![Point2::new(0.0, 0.0), Point2::new(90.0, 0.0)]);
    }

    #[test]
    fn test_peak_retained() {
        let input = vec![
            Point2::new(0.0, 0.0),
            Point2::new(50.0, 100.0),
            Point2::new(100.0, 0.0),
        ];
        assert_eq!(simplify(&input, 1.0), input);
    }

    #[test]
    fn test_short_input_copied() {
        let input = vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)];
        assert_eq!(simplify(&input, 10.0), input);
        assert!(simplify(&[], 1.0).is_empty());
    }

    #[test]
    fn test_small_wobble_removed() {
        let input = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.2),
            Point2::new(20.0, -0.3),
            Point2::new(30.0, 0.1),
            Point2::new(40.0, 0.0),
        ];
        let result = simplify(&input, 0.5);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_keeps_every_significant_corner() {
        // A staircase: each corner deviates well beyond the tolerance
        let input = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(20.0, 10.0),
            Point2::new(20.0, 20.0),
        ];
        assert_eq!(simplify(&input, 0.5), input);
    }

    #[test]
    fn test_deterministic() {
        let input: Vec<_> = (0..200)
            .map(|i| {
                let t = i as f64 * 0.1;
                Point2::new(t * 10.0, (t * 3.0).sin() * 5.0)
            })
            .collect();
        assert_eq!(simplify(&input, 0.25), simplify(&input, 0.25));
    }
}
