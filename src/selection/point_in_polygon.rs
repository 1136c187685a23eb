//! Point-in-polygon test by ray casting.
//!
//! Casts a ray from the point toward +x and counts the polygon edges it
//! crosses: odd = inside, even = outside. Edges use the same half-open row
//! rule and exact crossing positions as the scanline fill, and a point that
//! lies exactly on a crossing counts as inside, so for every cell the answer
//! matches whether the fill emits it.

use rayon::prelude::*;

use super::geometry::{is_collinear, Point};
use super::scanline::{crossing_at, ring_edges};
use std::cmp::Ordering;

/// Test if `(x, y)` is inside `polygon` (closing edge implied).
///
/// Polygons with fewer than 3 points, or whose points are all collinear,
/// contain nothing.
pub fn point_in_polygon(x: i32, y: i32, polygon: &[Point]) -> bool {
    if polygon.len() < 3 || is_collinear(polygon) {
        return false;
    }
    ray_cast(x, y, polygon)
}

/// Ray cast without the degeneracy checks.
fn ray_cast(x: i32, y: i32, polygon: &[Point]) -> bool {
    let mut inside = false;
    for (p1, p2) in ring_edges(polygon) {
        let Some(crossing) = crossing_at(p1, p2, y) else {
            continue;
        };
        match crossing.cmp_x(x as i64) {
            // On the boundary
            Ordering::Equal => return true,
            Ordering::Greater => inside = !inside,
            Ordering::Less => {}
        }
    }
    inside
}

/// Classify many points against one polygon in parallel.
///
/// Each entry of the result equals `point_in_polygon` for the matching
/// input point.
pub fn points_in_polygon(points: &[Point], polygon: &[Point]) -> Vec<bool> {
    if polygon.len() < 3 || is_collinear(polygon) {
        return vec![false; points.len()];
    }
    points
        .par_iter()
        .map(|p| ray_cast(p.x, p.y, polygon))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::scanline::fill_polygon;
    use crate::selection::scanline::tests::{naive_fill, random_star};
    use crate::selection::BoundingBox;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn square() -> Vec<Point> {
        [(0, 0), (4, 0), (4, 4), (0, 4), (0, 0)]
            .iter()
            .map(|&c| Point::from(c))
            .collect()
    }

    #[test]
    fn test_inside_and_outside() {
        let poly = square();
        assert!(point_in_polygon(2, 2, &poly));
        assert!(!point_in_polygon(6, 2, &poly));
        assert!(!point_in_polygon(-1, 2, &poly));
        assert!(!point_in_polygon(2, -1, &poly));
    }

    #[test]
    fn test_boundary_convention() {
        let poly = square();
        // Left and right edges are inside, matching the fill
        assert!(point_in_polygon(0, 2, &poly));
        assert!(point_in_polygon(4, 2, &poly));
        // Bottom row is inside, top row is not (half-open rows)
        assert!(point_in_polygon(2, 0, &poly));
        assert!(!point_in_polygon(2, 4, &poly));
    }

    #[test]
    fn test_degenerate_polygons() {
        assert!(!point_in_polygon(0, 0, &[]));
        assert!(!point_in_polygon(0, 0, &[Point::new(0, 0), Point::new(1, 1)]));
        let line = [Point::new(0, 0), Point::new(5, 5), Point::new(9, 9)];
        assert!(!point_in_polygon(5, 5, &line));
    }

    #[test]
    fn test_open_and_closed_ring_agree() {
        let closed = square();
        let open = &closed[..4];
        for y in -1..=5 {
            for x in -1..=5 {
                assert_eq!(point_in_polygon(x, y, open), point_in_polygon(x, y, &closed));
            }
        }
    }

    #[test]
    fn test_matches_fill_exactly() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let vertices = rng.random_range(3..16);
            let poly = random_star(&mut rng, vertices, 25.0);
            let filled: HashSet<(i32, i32)> =
                naive_fill(&poly, 0).iter().map(|c| (c.x, c.y)).collect();
            assert_eq!(
                filled,
                fill_polygon(&poly, 0).iter().map(|c| (c.x, c.y)).collect()
            );

            let bbox = BoundingBox::from_points(&poly);
            for y in bbox.min_y - 1..=bbox.max_y + 1 {
                for x in bbox.min_x - 1..=bbox.max_x + 1 {
                    assert_eq!(
                        point_in_polygon(x, y, &poly),
                        filled.contains(&(x, y)),
                        "({}, {}) in {:?}",
                        x,
                        y,
                        poly
                    );
                }
            }
        }
    }

    #[test]
    fn test_batch_matches_single() {
        let poly = square();
        let points: Vec<Point> = (-1..=5)
            .flat_map(|y| (-1..=5).map(move |x| Point::new(x, y)))
            .collect();
        let batch = points_in_polygon(&points, &poly);
        for (p, &inside) in points.iter().zip(&batch) {
            assert_eq!(inside, point_in_polygon(p.x, p.y, &poly));
        }
        assert_eq!(batch.iter().filter(|&&b| b).count(), 20);

        assert_eq!(points_in_polygon(&points, &poly[..2]), vec![false; points.len()]);
    }
}
