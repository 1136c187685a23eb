//! Ramer-Douglas-Peucker simplification of lasso paths.
//!
//! The simplified path is always a subsequence of the input that keeps the
//! first and last points. Every discarded point lies within `epsilon` of the
//! chord between the retained points around it, so the output never strays
//! further than `epsilon` from the raw path.

use super::geometry::Point;

/// Mark the points of `points` that survive simplification.
///
/// Returns a mask the length of the input. Endpoints are always kept.
/// Work ranges are processed from an explicit stack, so arbitrarily long
/// paths cannot exhaust the call stack.
pub fn douglas_peucker_mask(points: &[Point], epsilon: f64) -> Vec<bool> {
    let n = points.len();
    let mut keep = vec![false; n];
    if n == 0 {
        return keep;
    }
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0usize, n - 1)];
    while let Some((start, end)) = stack.pop() {
        // Fewer than 3 points: nothing between the endpoints
        if end - start < 2 {
            continue;
        }

        let first = &points[start];
        let last = &points[end];

        let mut max_dist = 0.0f64;
        let mut max_idx = start;
        for (i, point) in points.iter().enumerate().take(end).skip(start + 1) {
            let dist = point.distance_to_segment(first, last);
            if dist > max_dist {
                max_dist = dist;
                max_idx = i;
            }
        }

        if max_dist > epsilon {
            keep[max_idx] = true;
            stack.push((max_idx, end));
            stack.push((start, max_idx));
        }
    }

    keep
}

/// Simplify a polyline with Douglas-Peucker.
///
/// # Arguments
/// * `points` - Input polyline (open or closed ring)
/// * `epsilon` - Maximum allowed deviation in grid units
///
/// # Returns
/// The retained points in their original order.
pub fn douglas_peucker(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let keep = douglas_peucker_mask(points, epsilon);
    // Simplified lassos are usually well under half the raw size
    let mut simplified = Vec::with_capacity(points.len() / 2 + 2);
    simplified.extend(
        points
            .iter()
            .zip(&keep)
            .filter_map(|(p, &k)| k.then_some(*p)),
    );
    simplified
}

/// Largest distance from any point of `raw` to the polyline `simplified`.
///
/// Used to verify simplification fidelity; returns 0 for an empty path.
pub fn max_deviation(raw: &[Point], simplified: &[Point]) -> f64 {
    match simplified {
        [] => 0.0,
        [only] => raw.iter().map(|p| p.distance_to(only)).fold(0.0, f64::max),
        _ => raw
            .iter()
            .map(|p| {
                simplified
                    .windows(2)
                    .map(|w| p.distance_to_segment(&w[0], &w[1]))
                    .fold(f64::INFINITY, f64::min)
            })
            .fold(0.0, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&c| Point::from(c)).collect()
    }

    #[test]
    fn test_short_paths_unchanged() {
        assert!(douglas_peucker(&[], 0.5).is_empty());
        let two = pts(&[(0, 0), (5, 5)]);
        assert_eq!(douglas_peucker(&two, 0.5), two);
    }

    #[test]
    fn test_collinear_points_removed() {
        let line = pts(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert_eq!(douglas_peucker(&line, 0.5), pts(&[(0, 0), (4, 0)]));
    }

    #[test]
    fn test_corner_kept() {
        let corner = pts(&[(0, 0), (2, 0), (4, 0), (4, 2), (4, 4)]);
        assert_eq!(douglas_peucker(&corner, 0.5), pts(&[(0, 0), (4, 0), (4, 4)]));
    }

    #[test]
    fn test_jitter_within_tolerance_removed() {
        // Staircase never deviates more than ~0.7 from the diagonal
        let stairs = pts(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (3, 2), (3, 3)]);
        let simplified = douglas_peucker(&stairs, 1.0);
        assert_eq!(simplified, pts(&[(0, 0), (3, 3)]));
        assert!(max_deviation(&stairs, &simplified) <= 1.0);
    }

    #[test]
    fn test_zero_tolerance_keeps_every_corner() {
        let stairs = pts(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)]);
        assert_eq!(douglas_peucker(&stairs, 0.0), stairs);
    }

    #[test]
    fn test_closed_ring_keeps_far_points() {
        // First == last: chord degenerates to a point
        let ring = pts(&[(0, 0), (10, 0), (5, 10), (0, 0)]);
        assert_eq!(douglas_peucker(&ring, 0.5), ring);
    }

    #[test]
    fn test_backtracking_point_kept() {
        // (-5, 0) is on the chord's line but far from the chord itself
        let path = pts(&[(0, 0), (-5, 0), (10, 0)]);
        let simplified = douglas_peucker(&path, 0.5);
        assert_eq!(simplified, path);
        assert_eq!(max_deviation(&path, &simplified), 0.0);
    }

    #[test]
    fn test_long_path_does_not_overflow_stack() {
        // Zig-zag that keeps every point, the worst case for recursion depth
        let path: Vec<Point> = (0..5_000)
            .map(|i| Point::new(i, if i % 2 == 0 { 0 } else { 3 }))
            .collect();
        let simplified = douglas_peucker(&path, 0.5);
        assert_eq!(simplified.len(), path.len());
    }
}
