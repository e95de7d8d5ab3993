use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate. Ordered in raster order: by row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Axis-aligned rectangle: inclusive top-left corner, exclusive extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle covering both corners, which are inclusive.
    pub fn from_corners(min: Point, max: Point) -> Self {
        let x0 = min.x.min(max.x).max(0) as u32;
        let y0 = min.y.min(max.y).max(0) as u32;
        let x1 = min.x.max(max.x).max(0) as u32;
        let y1 = min.y.max(max.y).max(0) as u32;
        Self::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x as i32
            && point.y >= self.y as i32
            && (point.x as i64) < self.right() as i64
            && (point.y as i64) < self.bottom() as i64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}
