//! End-to-end checks of the lasso pipeline: record, close, simplify, fill.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tile_lasso::selection::geometry::signed_area_doubled;
use tile_lasso::selection::simplify::{douglas_peucker, max_deviation};
use tile_lasso::{LassoConfig, LassoSelection, LassoState, Point};

/// A jittery freehand loop: points around an ellipse with random wobble.
fn random_drag(rng: &mut StdRng, samples: usize) -> Vec<Point> {
    let rx = rng.random_range(3.0..30.0);
    let ry = rng.random_range(3.0..30.0);
    let cx = rng.random_range(-100..100);
    let cy = rng.random_range(-100..100);
    (0..samples)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / samples as f64;
            let wobble = rng.random_range(-1.5..1.5);
            Point::new(
                cx + ((rx + wobble) * a.cos()).round() as i32,
                cy + ((ry + wobble) * a.sin()).round() as i32,
            )
        })
        .collect()
}

fn closed_lasso(points: &[Point]) -> LassoSelection {
    let mut lasso = LassoSelection::new();
    for p in points {
        lasso.add_point(p.x, p.y);
    }
    lasso.close_path();
    lasso
}

#[test]
fn simplification_stays_within_tolerance() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let samples = rng.random_range(3..300);
        let raw: Vec<Point> = (0..samples)
            .map(|_| Point::new(rng.random_range(-40..40), rng.random_range(-40..40)))
            .collect();
        let epsilon = rng.random_range(0.0..5.0);

        let simplified = douglas_peucker(&raw, epsilon);
        assert!(simplified.len() <= raw.len());
        assert_eq!(simplified.first(), raw.first());
        assert_eq!(simplified.last(), raw.last());
        assert!(max_deviation(&raw, &simplified) <= epsilon + 1e-9);
    }
}

#[test]
fn closed_lasso_simplification_keeps_ring_endpoints() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..50 {
        let samples = rng.random_range(8..200);
        let lasso = closed_lasso(&random_drag(&mut rng, samples));
        assert!(lasso.is_closed());

        let raw = lasso.path();
        let simplified = lasso.simplified_path();
        assert_eq!(raw.first(), raw.last());
        assert_eq!(simplified.first(), raw.first());
        assert_eq!(simplified.last(), raw.last());
        assert!(max_deviation(raw, simplified) <= lasso.config().simplify_tolerance + 1e-9);
    }
}

#[test]
fn close_path_twice_keeps_first_result() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut lasso = closed_lasso(&random_drag(&mut rng, 64));
    let path = lasso.path().to_vec();
    let cells = lasso.cells_in_polygon(3);

    lasso.close_path();
    assert_eq!(lasso.path(), path.as_slice());
    assert_eq!(lasso.cells_in_polygon(3), cells);
}

#[test]
fn fill_and_containment_agree() {
    let mut rng = StdRng::seed_from_u64(14);
    for _ in 0..40 {
        let samples = rng.random_range(8..120);
        let lasso = closed_lasso(&random_drag(&mut rng, samples));
        let cells = lasso.cells_in_polygon(1);
        let filled: HashSet<(i32, i32)> = cells.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(filled.len(), cells.len(), "cells must be unique");

        for c in &cells {
            assert!(lasso.contains_point(c.x, c.y), "filled cell {:?} not contained", c);
        }

        let Some((min_x, min_y, max_x, max_y)) = lasso.bounding_box().bounds() else {
            panic!("closed lasso without bounds");
        };
        let probes: Vec<Point> = (0..500)
            .map(|_| {
                Point::new(
                    rng.random_range(min_x - 3..=max_x + 3),
                    rng.random_range(min_y - 3..=max_y + 3),
                )
            })
            .collect();
        let inside = lasso.contains_points(&probes);
        for (p, is_inside) in probes.iter().zip(inside) {
            assert_eq!(is_inside, filled.contains(&(p.x, p.y)), "probe {:?}", p);
        }
    }
}

#[test]
fn degenerate_inputs_are_empty() {
    let mut lasso = LassoSelection::new();
    lasso.clear();
    lasso.close_path();
    assert_eq!(lasso.state(), LassoState::Empty);
    assert!(lasso.cells_in_polygon(0).is_empty());

    lasso.add_point(0, 0);
    lasso.add_point(3, 3);
    lasso.close_path();
    assert!(lasso.cells_in_polygon(0).is_empty());
    assert!(!lasso.contains_point(1, 1));

    // Collinear drag: closes, but encloses nothing
    let lasso = closed_lasso(&[Point::new(0, 0), Point::new(5, 5), Point::new(9, 9)]);
    assert!(lasso.is_closed());
    assert!(lasso.cells_in_polygon(0).is_empty());
}

#[test]
fn square_scenario() {
    let lasso = closed_lasso(&[
        Point::new(0, 0),
        Point::new(4, 0),
        Point::new(4, 4),
        Point::new(0, 4),
    ]);
    let cells = lasso.cells_in_polygon(7);
    assert_eq!(cells.len(), 20);
    let expected: HashSet<(i32, i32, i32)> = (0..=3)
        .flat_map(|y| (0..=4).map(move |x| (x, y, 7)))
        .collect();
    let actual: HashSet<(i32, i32, i32)> = cells.iter().map(|c| (c.x, c.y, c.floor)).collect();
    assert_eq!(actual, expected);
}

#[test]
fn identical_points_recorded_once() {
    let mut lasso = LassoSelection::new();
    lasso.add_point(0, 0);
    lasso.add_point(0, 0);
    assert_eq!(lasso.path().len(), 1);
}

#[test]
fn triangle_cell_count_tracks_area() {
    let lasso = closed_lasso(&[Point::new(0, 0), Point::new(10, 0), Point::new(5, 10)]);
    let cells = lasso.cells_in_polygon(0);

    let area = signed_area_doubled(lasso.polygon()).unsigned_abs() as f64 / 2.0;
    assert_eq!(area, 50.0);
    assert_eq!(cells.len(), 60);

    // Boundary rounding is bounded by the perimeter
    let perimeter: f64 = lasso
        .polygon()
        .windows(2)
        .map(|w| w[0].distance_to(&w[1]))
        .sum();
    assert!((cells.len() as f64 - area).abs() <= perimeter);
}

#[test]
fn custom_tolerance_reduces_vertices() {
    let mut rng = StdRng::seed_from_u64(15);
    let drag = random_drag(&mut rng, 200);

    let fine = closed_lasso(&drag);
    let coarse = LassoSelection::from_points(
        drag.iter().copied(),
        LassoConfig::default().with_simplify_tolerance(3.0),
    )
    .unwrap();

    assert_eq!(fine.path(), coarse.path());
    assert!(coarse.simplified_path().len() <= fine.simplified_path().len());
}
