//! A labeled region and its geometry.
//!
//! Every feature is computed on first request and cached for the life of
//! the component; the pixel set never changes after construction.

mod chain;
mod hull;

#[cfg(test)]
mod tests;

use std::cell::OnceCell;
use std::f64::consts::PI;

use hashbrown::HashSet;
use raster::{Point, Rect};

pub use chain::DIRECTIONS;

const NEIGHBORS_8: [(i32, i32); 8] = DIRECTIONS;

#[derive(Debug)]
pub struct ConnectedComponent {
    label: u32,
    /// Sorted in raster order, no duplicates.
    pixels: Vec<Point>,
    members: OnceCell<HashSet<Point>>,
    bounding_box: OnceCell<Rect>,
    centroid: OnceCell<Point>,
    perimeter_points: OnceCell<Vec<Point>>,
    hull: OnceCell<Vec<Point>>,
    hull_interior: OnceCell<Vec<Point>>,
    hull_perimeter_points: OnceCell<Vec<Point>>,
    max_diameter: OnceCell<f64>,
    chain_code: OnceCell<Vec<u8>>,
}

impl ConnectedComponent {
    pub fn new(label: u32, mut pixels: Vec<Point>) -> Self {
        pixels.sort_unstable();
        pixels.dedup();
        Self {
            label,
            pixels,
            members: OnceCell::new(),
            bounding_box: OnceCell::new(),
            centroid: OnceCell::new(),
            perimeter_points: OnceCell::new(),
            hull: OnceCell::new(),
            hull_interior: OnceCell::new(),
            hull_perimeter_points: OnceCell::new(),
            max_diameter: OnceCell::new(),
            chain_code: OnceCell::new(),
        }
    }

    /// Root label this component was resolved to.
    pub fn label(&self) -> u32 {
        self.label
    }

    pub fn pixels(&self) -> &[Point] {
        &self.pixels
    }

    pub fn area(&self) -> usize {
        self.pixels.len()
    }

    fn members(&self) -> &HashSet<Point> {
        self.members.get_or_init(|| self.pixels.iter().copied().collect())
    }

    pub fn contains(&self, p: Point) -> bool {
        self.members().contains(&p)
    }

    /// Tight box around the pixels. Empty components report a zero rectangle.
    pub fn bounding_box(&self) -> Rect {
        *self.bounding_box.get_or_init(|| {
            let Some(first) = self.pixels.first() else {
                return Rect::default();
            };
            let (mut min, mut max) = (*first, *first);
            for p in &self.pixels {
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
            }
            Rect::from_corners(min, max)
        })
    }

    /// Mean pixel coordinate, truncated.
    pub fn centroid(&self) -> Point {
        *self.centroid.get_or_init(|| {
            if self.pixels.is_empty() {
                return Point::default();
            }
            let n = self.pixels.len() as i64;
            let sx: i64 = self.pixels.iter().map(|p| p.x as i64).sum();
            let sy: i64 = self.pixels.iter().map(|p| p.y as i64).sum();
            Point::new((sx / n) as i32, (sy / n) as i32)
        })
    }

    /// The ring of 8-neighbors just outside the pixel set, in raster order.
    pub fn perimeter_points(&self) -> &[Point] {
        self.perimeter_points
            .get_or_init(|| outer_ring(&self.pixels, self.members()))
    }

    /// Convex hull of the perimeter points, fewer than three points when degenerate.
    pub fn hull(&self) -> &[Point] {
        self.hull
            .get_or_init(|| hull::jarvis_march(self.perimeter_points()))
    }

    /// Integer points of the bounding box lying inside or on the hull.
    pub fn hull_interior(&self) -> &[Point] {
        self.hull_interior.get_or_init(|| {
            let hull = self.hull();
            let bbox = self.bounding_box();
            let mut inside = Vec::new();
            for y in bbox.y..bbox.bottom() {
                for x in bbox.x..bbox.right() {
                    let p = Point::new(x as i32, y as i32);
                    if hull::contains(hull, p) {
                        inside.push(p);
                    }
                }
            }
            inside
        })
    }

    /// Perimeter ring of the hull interior.
    pub fn hull_perimeter_points(&self) -> &[Point] {
        self.hull_perimeter_points.get_or_init(|| {
            let interior = self.hull_interior();
            let set: HashSet<Point> = interior.iter().copied().collect();
            outer_ring(interior, &set)
        })
    }

    pub fn hull_area(&self) -> usize {
        self.hull_interior().len()
    }

    /// Longest distance between two hull vertices.
    pub fn max_diameter(&self) -> f64 {
        *self
            .max_diameter
            .get_or_init(|| hull::rotating_calipers_diameter(self.hull()))
    }

    /// Boundary directions from the first raster pixel; see [`DIRECTIONS`].
    pub fn chain_code(&self) -> &[u8] {
        self.chain_code.get_or_init(|| match self.pixels.first() {
            Some(&start) => chain::trace(self.members(), start),
            None => Vec::new(),
        })
    }

    pub fn perimeter_length(&self) -> f64 {
        chain::length(self.chain_code())
    }

    /// `4 * hull_area / (pi * max_diameter^2)`: near 1 for discs, about
    /// 0.55 for equilateral triangles. 0 when the diameter is 0.
    pub fn circularity(&self) -> f64 {
        let d = self.max_diameter();
        if d == 0.0 {
            return 0.0;
        }
        4.0 * self.hull_area() as f64 / (PI * d * d)
    }
}

fn outer_ring(pixels: &[Point], members: &HashSet<Point>) -> Vec<Point> {
    let mut ring = HashSet::new();
    for p in pixels {
        for (dx, dy) in NEIGHBORS_8 {
            let n = p.offset(dx, dy);
            if !members.contains(&n) {
                ring.insert(n);
            }
        }
    }
    let mut ring: Vec<Point> = ring.into_iter().collect();
    ring.sort_unstable();
    ring
}
