//! Convex hull geometry on integer points.

use raster::Point;

/// Z component of `(b - a) x (c - a)`.
#[inline]
pub(crate) fn cross(a: Point, b: Point, c: Point) -> i64 {
    let (abx, aby) = ((b.x - a.x) as i64, (b.y - a.y) as i64);
    let (acx, acy) = ((c.x - a.x) as i64, (c.y - a.y) as i64);
    abx * acy - aby * acx
}

#[inline]
pub(crate) fn dist2(a: Point, b: Point) -> i64 {
    let (dx, dy) = ((b.x - a.x) as i64, (b.y - a.y) as i64);
    dx * dx + dy * dy
}

/// Gift wrapping. Starts at the leftmost point (topmost among those) and
/// repeatedly takes the point with every other point on one side of the
/// current edge, preferring the farthest one when several are collinear.
/// Returns the input unchanged when it has fewer than three points.
pub(crate) fn jarvis_march(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let Some(&start) = points.iter().min_by_key(|p| (p.x, p.y)) else {
        return Vec::new();
    };

    let mut hull = vec![start];
    let mut current = start;

    // A hull never has more vertices than input points
    for _ in 0..points.len() {
        let mut candidate = if points[0] == current { points[1] } else { points[0] };

        for &p in points {
            if p == current {
                continue;
            }
            let turn = cross(current, candidate, p);
            if turn > 0 || (turn == 0 && dist2(current, p) > dist2(current, candidate)) {
                candidate = p;
            }
        }

        if candidate == start {
            break;
        }
        hull.push(candidate);
        current = candidate;
    }

    hull
}

/// True when `p` lies inside or on the boundary of the convex polygon `hull`:
/// the edge cross products never take both signs.
pub(crate) fn contains(hull: &[Point], p: Point) -> bool {
    match hull.len() {
        0 => false,
        1 => hull[0] == p,
        n => {
            let mut positive = false;
            let mut negative = false;
            for i in 0..n {
                let turn = cross(hull[i], hull[(i + 1) % n], p);
                positive |= turn > 0;
                negative |= turn < 0;
                if positive && negative {
                    return false;
                }
            }
            if n == 2 {
                // Two vertices: inside means on the segment itself
                let (a, b) = (hull[0], hull[1]);
                return p.x >= a.x.min(b.x)
                    && p.x <= a.x.max(b.x)
                    && p.y >= a.y.min(b.y)
                    && p.y <= a.y.max(b.y);
            }
            true
        }
    }
}

/// Largest vertex-to-vertex distance of a convex polygon via rotating
/// calipers. For each edge, the opposite pointer advances while the
/// triangle it spans with the edge keeps growing. O(n).
pub(crate) fn rotating_calipers_diameter(hull: &[Point]) -> f64 {
    let n = hull.len();
    match n {
        0 | 1 => return 0.0,
        2 => return (dist2(hull[0], hull[1]) as f64).sqrt(),
        _ => {}
    }

    let area = |i: usize, j: usize, k: usize| cross(hull[i], hull[j], hull[k]).abs();

    let mut best = 0i64;
    let mut j = 1;
    for i in 0..n {
        let next = (i + 1) % n;
        while area(i, next, (j + 1) % n) > area(i, next, j) {
            j = (j + 1) % n;
        }
        best = best.max(dist2(hull[i], hull[j])).max(dist2(hull[next], hull[j]));
    }

    (best as f64).sqrt()
}
