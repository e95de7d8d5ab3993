//! Freeman chain code by 8-direction Moore boundary tracing.

use hashbrown::HashSet;
use raster::Point;

/// Direction offsets, clockwise on screen starting from "right":
/// E, SE, S, SW, W, NW, N, NE.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const WEST: u8 = 4;

fn step(p: Point, direction: u8) -> Point {
    let (dx, dy) = DIRECTIONS[direction as usize];
    p.offset(dx, dy)
}

/// First member neighbor of `p`, sweeping clockwise from `from`.
fn sweep(members: &HashSet<Point>, p: Point, from: u8) -> Option<u8> {
    (0..8)
        .map(|k| (from + k) % 8)
        .find(|&d| members.contains(&step(p, d)))
}

/// Traces the outer boundary starting at `start`, the first member in
/// raster order, and returns one direction per step.
///
/// The sweep around each new pixel resumes just past the pixel it came
/// from. Tracing stops on returning to `start` about to repeat the first
/// move. An isolated pixel yields an empty code.
pub(crate) fn trace(members: &HashSet<Point>, start: Point) -> Vec<u8> {
    // Nothing lies above or to the left of the first raster pixel
    let Some(first) = sweep(members, start, WEST) else {
        return Vec::new();
    };

    let mut code = vec![first];
    let mut current = step(start, first);
    let mut direction = first;

    // Every boundary pixel is entered at most once per side
    let limit = 8 * members.len() + 8;
    for _ in 0..limit {
        let from = if direction % 2 == 0 {
            (direction + 6) % 8
        } else {
            (direction + 5) % 8
        };
        let Some(next) = sweep(members, current, from) else {
            break;
        };
        if current == start && next == first {
            return code;
        }
        code.push(next);
        current = step(current, next);
        direction = next;
    }

    tracing::warn!("Boundary trace from {:?} did not close after {} steps", start, limit);
    code
}

/// 1 per axis step, sqrt(2) per diagonal step.
pub(crate) fn length(code: &[u8]) -> f64 {
    code.iter()
        .map(|&d| if d % 2 == 0 { 1.0 } else { std::f64::consts::SQRT_2 })
        .sum()
}
