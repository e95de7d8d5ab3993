use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

fn block(x0: i32, y0: i32, w: i32, h: i32) -> ConnectedComponent {
    let pixels = (y0..y0 + h)
        .flat_map(|y| (x0..x0 + w).map(move |x| Point::new(x, y)))
        .collect();
    ConnectedComponent::new(1, pixels)
}

fn disc(radius: i32) -> ConnectedComponent {
    let pixels = (-radius..=radius)
        .flat_map(|y| (-radius..=radius).map(move |x| Point::new(x + radius, y + radius)))
        .filter(|p| {
            let (dx, dy) = (p.x - radius, p.y - radius);
            dx * dx + dy * dy <= radius * radius
        })
        .collect();
    ConnectedComponent::new(1, pixels)
}

/// Random 8-connected blob grown by a walk.
fn random_walk(seed: u64, steps: usize) -> ConnectedComponent {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut p = Point::new(50, 50);
    let mut pixels = vec![p];
    for _ in 0..steps {
        let (dx, dy) = DIRECTIONS[rng.random_range(0..8)];
        p = p.offset(dx, dy);
        pixels.push(p);
    }
    ConnectedComponent::new(1, pixels)
}

// =============================================================================
// Basic features
// =============================================================================

#[test]
fn test_square_basic_features() {
    let square = block(0, 0, 5, 5);

    assert_eq!(square.area(), 25);
    assert_eq!(square.bounding_box(), Rect::new(0, 0, 5, 5));
    assert_eq!(square.centroid(), Point::new(2, 2));
}

#[test]
fn test_centroid_truncates() {
    // Mean x = 0.5, mean y = 0
    let pair = ConnectedComponent::new(3, vec![Point::new(1, 0), Point::new(0, 0)]);
    assert_eq!(pair.centroid(), Point::new(0, 0));
    assert_eq!(pair.pixels(), &[Point::new(0, 0), Point::new(1, 0)]);
    assert_eq!(pair.label(), 3);
}

#[test]
fn test_empty_component() {
    let empty = ConnectedComponent::new(1, Vec::new());
    assert_eq!(empty.bounding_box(), Rect::default());
    assert!(empty.hull().is_empty());
    assert_eq!(empty.max_diameter(), 0.0);
    assert_eq!(empty.circularity(), 0.0);
    assert!(empty.chain_code().is_empty());
}

#[test]
fn test_features_are_memoized() {
    let square = block(2, 3, 4, 4);
    let first = square.hull_interior();
    let second = square.hull_interior();
    assert!(std::ptr::eq(first, second));
}

// =============================================================================
// Perimeter and hull
// =============================================================================

#[test]
fn test_square_perimeter_and_hull() {
    let square = block(0, 0, 5, 5);

    // 7x7 ring minus the 5x5 body
    assert_eq!(square.perimeter_points().len(), 24);
    assert!(square.perimeter_points().iter().all(|p| !square.contains(*p)));

    let mut corners = square.hull().to_vec();
    corners.sort();
    assert_eq!(
        corners,
        vec![
            Point::new(-1, -1),
            Point::new(5, -1),
            Point::new(-1, 5),
            Point::new(5, 5)
        ]
    );

    assert_eq!(square.hull_area(), 25);
    assert_eq!(square.hull_perimeter_points(), square.perimeter_points());
    assert!((square.max_diameter() - 6.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
}

#[test]
fn test_single_pixel_hull() {
    let dot = block(4, 4, 1, 1);
    assert_eq!(dot.perimeter_points().len(), 8);
    assert_eq!(dot.hull().len(), 4);
    assert_eq!(dot.hull_interior(), &[Point::new(4, 4)]);
}

#[test]
fn test_l_shape_hull_fills_concavity() {
    // Column x = 0 for y in 0..5 plus row y = 4 for x in 0..5
    let mut pixels: Vec<Point> = (0..5).map(|y| Point::new(0, y)).collect();
    pixels.extend((1..5).map(|x| Point::new(x, 4)));
    let l_shape = ConnectedComponent::new(1, pixels);

    assert!(l_shape.hull_area() > l_shape.area());
    let interior = l_shape.hull_interior();
    assert!(interior.contains(&Point::new(2, 2)));
    assert!(interior.contains(&Point::new(3, 1)), "point on the hull edge counts as inside");
    assert!(!interior.contains(&Point::new(4, 0)));
}

#[test]
fn test_hull_contains_every_pixel() {
    for seed in 0..20 {
        let blob = random_walk(seed, 80);
        let hull = blob.hull();
        for &p in blob.pixels() {
            assert!(hull::contains(hull, p), "seed {}: pixel {:?} outside hull", seed, p);
        }
        let interior: HashSet<Point> = blob.hull_interior().iter().copied().collect();
        assert!(blob.pixels().iter().all(|p| interior.contains(p)));
    }
}

#[test]
fn test_calipers_match_brute_force() {
    for seed in 0..20 {
        let blob = random_walk(seed + 100, 60);
        let hull = blob.hull();
        let brute = hull
            .iter()
            .flat_map(|&a| hull.iter().map(move |&b| hull::dist2(a, b)))
            .max()
            .unwrap_or(0);
        assert!(
            (blob.max_diameter() - (brute as f64).sqrt()).abs() < 1e-9,
            "seed {}: calipers {} vs brute {}",
            seed,
            blob.max_diameter(),
            (brute as f64).sqrt()
        );
    }
}

// =============================================================================
// Chain code
// =============================================================================

#[test]
fn test_chain_code_traces_square_boundary() {
    // Genuine boundary tracing: 4 steps along each side of a 5x5 square
    let square = block(0, 0, 5, 5);
    let code = square.chain_code();

    assert_eq!(code.len(), 16);
    assert_eq!(&code[..4], &[0, 0, 0, 0]);
    assert_eq!(&code[4..8], &[2, 2, 2, 2]);
    assert!((square.perimeter_length() - 16.0).abs() < 1e-12);
}

#[test]
fn test_chain_code_closes() {
    for seed in 0..10 {
        let blob = random_walk(seed + 200, 50);
        let mut p = blob.pixels()[0];
        for &d in blob.chain_code() {
            let (dx, dy) = DIRECTIONS[d as usize];
            p = p.offset(dx, dy);
            assert!(blob.contains(p), "seed {}: trace left the component at {:?}", seed, p);
        }
        assert_eq!(p, blob.pixels()[0], "seed {}: trace did not return to start", seed);
    }
}

#[test]
fn test_chain_code_diagonal_line() {
    let line = ConnectedComponent::new(1, vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]);
    assert_eq!(line.chain_code(), &[1, 1, 5, 5]);
    assert!((line.perimeter_length() - 4.0 * std::f64::consts::SQRT_2).abs() < 1e-12);
}

#[test]
fn test_isolated_pixel_has_empty_chain_code() {
    let dot = block(0, 0, 1, 1);
    assert!(dot.chain_code().is_empty());
    assert_eq!(dot.perimeter_length(), 0.0);
}

// =============================================================================
// Circularity
// =============================================================================

#[test]
fn test_circularity_separates_shapes() {
    let round = disc(20);
    assert!(round.circularity() > 0.8, "disc circularity {}", round.circularity());

    let square = block(0, 0, 30, 30);
    assert!(square.circularity() < 0.65, "square circularity {}", square.circularity());

    // Upward triangle with a 41 pixel base
    let triangle_pixels = (0..21)
        .flat_map(|y| (20 - y..=20 + y).map(move |x| Point::new(x, y)))
        .collect();
    let triangle = ConnectedComponent::new(1, triangle_pixels);
    assert!(triangle.circularity() < 0.65, "triangle circularity {}", triangle.circularity());
}
