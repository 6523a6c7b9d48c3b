#![warn(missing_docs)]

//! Ramer-Douglas-Peucker polyline simplification.
//!
//! Reduces the point count of a profile polyline ahead of mesh
//! generation: the point of maximum perpendicular deviation from the
//! chord between a segment's endpoints either splits the segment (when
//! the deviation exceeds the tolerance) or the whole segment collapses
//! to its endpoints.
//!
//! The recursion works on index ranges into the immutable input slice
//! (no sub-slices are copied) and collects the surviving indices, so the
//! output is always a subsequence of the input retaining the first and
//! last point. Simplification is for geometry generation only; volume
//! quadrature always sees the full-resolution curve.

use pithos_math::Point2;

/// Perpendicular distance from `p` to the infinite line through `a` and
/// `b`. When the chord endpoints coincide the distance to `a` is used.
pub fn perpendicular_distance(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    if a == b {
        return (p - a).norm();
    }
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * (a.y - p.y) - (a.x - p.x) * dy).abs() / (dx * dx + dy * dy).sqrt()
}

/// Simplify a polyline with tolerance `epsilon`, returning the surviving
/// points. Inputs with fewer than 3 points are returned unchanged.
///
/// A larger `epsilon` never yields more points than a smaller one, and
/// re-simplifying an already simplified polyline with the same tolerance
/// is a no-op.
pub fn simplify(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    simplify_indices(points, epsilon)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Simplify a polyline, returning the indices of the surviving points
/// (always including the first and last).
pub fn simplify_indices(points: &[Point2], epsilon: f64) -> Vec<usize> {
    if points.len() < 3 {
        return (0..points.len()).collect();
    }
    let mut kept = Vec::new();
    simplify_range(points, 0, points.len() - 1, epsilon, &mut kept);
    kept.push(points.len() - 1);
    kept
}

/// Recurse over the inclusive index range `[lo, hi]`, pushing every kept
/// index except `hi` (the caller owns the closing endpoint, so
/// concatenated sub-ranges never duplicate their shared split point).
fn simplify_range(points: &[Point2], lo: usize, hi: usize, epsilon: f64, kept: &mut Vec<usize>) {
    if hi - lo < 2 {
        // Too short to contain an interior point; keep everything.
        kept.extend(lo..hi);
        return;
    }

    // Point of maximum deviation from the chord; the first maximum wins
    // ties, matching the scan order.
    let mut d_max = 0.0;
    let mut split = lo;
    for i in lo + 1..hi {
        let d = perpendicular_distance(&points[i], &points[lo], &points[hi]);
        if d > d_max {
            d_max = d;
            split = i;
        }
    }

    if d_max > epsilon {
        simplify_range(points, lo, split, epsilon, kept);
        simplify_range(points, split, hi, epsilon, kept);
    } else {
        kept.push(lo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point2> {
        raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn test_short_input_unchanged() {
        let input = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(simplify(&input, 10.0), input);
    }

    #[test]
    fn test_collinear_collapses_to_endpoints() {
        let input = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let out = simplify(&input, 0.01);
        assert_eq!(out, pts(&[(0.0, 0.0), (3.0, 3.0)]));
    }

    #[test]
    fn test_significant_point_retained() {
        let input = pts(&[(0.0, 0.0), (1.0, 2.0), (2.0, 0.0)]);
        let out = simplify(&input, 0.5);
        assert_eq!(out, input);
    }

    #[test]
    fn test_endpoints_always_preserved() {
        let input = pts(&[(0.0, 5.0), (1.0, 5.1), (2.0, 4.9), (3.0, 5.0)]);
        for eps in [0.0, 0.05, 0.5, 100.0] {
            let out = simplify(&input, eps);
            assert_eq!(out.first(), input.first(), "eps = {eps}");
            assert_eq!(out.last(), input.last(), "eps = {eps}");
        }
    }

    #[test]
    fn test_monotone_reduction() {
        let input: Vec<Point2> = (0..50)
            .map(|i| {
                let x = i as f64 * 0.2;
                Point2::new(x, (x * 1.3).sin() + 0.3 * (x * 4.1).cos())
            })
            .collect();
        let mut prev_len = usize::MAX;
        for eps in [0.001, 0.01, 0.1, 0.5, 2.0] {
            let out = simplify(&input, eps);
            assert!(out.len() <= prev_len, "eps = {eps}");
            assert!(out.len() <= input.len());
            prev_len = out.len();
        }
    }

    #[test]
    fn test_idempotent() {
        let input: Vec<Point2> = (0..30)
            .map(|i| {
                let x = i as f64 * 0.3;
                Point2::new(x, (x * 0.9).sin())
            })
            .collect();
        let once = simplify(&input, 0.05);
        let twice = simplify(&once, 0.05);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_output_is_subsequence() {
        let input: Vec<Point2> = (0..20)
            .map(|i| Point2::new(i as f64, ((i * 7) % 5) as f64))
            .collect();
        let indices = simplify_indices(&input, 0.8);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*indices.first().unwrap(), 0);
        assert_eq!(*indices.last().unwrap(), input.len() - 1);
    }

    #[test]
    fn test_perpendicular_distance_degenerate_chord() {
        let a = Point2::new(1.0, 1.0);
        let p = Point2::new(4.0, 5.0);
        assert!((perpendicular_distance(&p, &a, &a) - 5.0).abs() < 1e-12);
    }
}
