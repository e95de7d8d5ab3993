//! Box mean in three complexity tiers. All three produce identical output:
//! the per-channel window sum divided by `dim * dim`, rounded half up.

use super::border::{visit_regions, Region};
use super::{mean_channel, validate_dim};
use crate::{Bgr, PixelBuffer, Result, CHANNELS};

type Sum = [i64; 3];

#[inline]
fn add_pixel(acc: &mut Sum, px: Bgr) {
    acc[0] += px.b as i64;
    acc[1] += px.g as i64;
    acc[2] += px.r as i64;
}

#[inline]
fn sub_pixel(acc: &mut Sum, px: Bgr) {
    acc[0] -= px.b as i64;
    acc[1] -= px.g as i64;
    acc[2] -= px.r as i64;
}

#[inline]
fn add_sum(acc: &mut Sum, other: Sum) {
    acc[0] += other[0];
    acc[1] += other[1];
    acc[2] += other[2];
}

#[inline]
fn sub_sum(acc: &mut Sum, other: Sum) {
    acc[0] -= other[0];
    acc[1] -= other[1];
    acc[2] -= other[2];
}

#[inline]
fn to_pixel(sum: Sum, count: i64) -> Bgr {
    Bgr::new(
        mean_channel(sum[0], count),
        mean_channel(sum[1], count),
        mean_channel(sum[2], count),
    )
}

/// Direct window summation, O(W·H·dim²).
pub fn mean_quadratic(src: &PixelBuffer, dim: usize) -> Result<PixelBuffer> {
    validate_dim(dim)?;

    let mut out = PixelBuffer::new(src.width(), src.height());
    if src.is_empty() {
        return Ok(out);
    }

    let r = dim / 2;
    let count = (dim * dim) as i64;
    let stride = src.stride();
    let bytes = src.bytes();

    visit_regions(
        src.width() as usize,
        src.height() as usize,
        r,
        r,
        |x, y, region| {
            let mut sum = [0i64; 3];
            match region {
                Region::Interior => {
                    for wy in y - r..=y + r {
                        let row = &bytes[wy * stride..];
                        for wx in x - r..=x + r {
                            let i = wx * CHANNELS;
                            sum[0] += row[i] as i64;
                            sum[1] += row[i + 1] as i64;
                            sum[2] += row[i + 2] as i64;
                        }
                    }
                }
                Region::Border => {
                    let r = r as i64;
                    for dy in -r..=r {
                        for dx in -r..=r {
                            add_pixel(&mut sum, src.pixel_clamped(x as i64 + dx, y as i64 + dy));
                        }
                    }
                }
            }
            out.set_pixel(x as u32, y as u32, to_pixel(sum, count));
        },
    );

    Ok(out)
}

/// Sliding sums, O(W·H): horizontal window sums per row into an
/// intermediate buffer, then a vertical slide down each column of it.
pub fn mean_linear(src: &PixelBuffer, dim: usize) -> Result<PixelBuffer> {
    validate_dim(dim)?;

    let mut out = PixelBuffer::new(src.width(), src.height());
    if src.is_empty() {
        return Ok(out);
    }

    let (w, h) = (src.width() as usize, src.height() as usize);
    let r = (dim / 2) as i64;
    let count = (dim * dim) as i64;

    let mut row_sums = vec![[0i64; 3]; w * h];
    for y in 0..h {
        let yi = y as i64;
        let mut acc = [0i64; 3];
        for dx in -r..=r {
            add_pixel(&mut acc, src.pixel_clamped(dx, yi));
        }
        row_sums[y * w] = acc;

        for x in 1..w as i64 {
            sub_pixel(&mut acc, src.pixel_clamped(x - 1 - r, yi));
            add_pixel(&mut acc, src.pixel_clamped(x + r, yi));
            row_sums[y * w + x as usize] = acc;
        }
    }

    let last_row = h as i64 - 1;
    for x in 0..w {
        let at = |y: i64| row_sums[y.clamp(0, last_row) as usize * w + x];

        let mut acc = [0i64; 3];
        for dy in -r..=r {
            add_sum(&mut acc, at(dy));
        }
        out.set_pixel(x as u32, 0, to_pixel(acc, count));

        for y in 1..h as i64 {
            sub_sum(&mut acc, at(y - 1 - r));
            add_sum(&mut acc, at(y + r));
            out.set_pixel(x as u32, y as u32, to_pixel(acc, count));
        }
    }

    Ok(out)
}

/// Summed-area recurrence, O(W·H) independent of `dim`.
///
/// After the first row and column, each window sum is derived from its left,
/// upper and upper-left neighbors plus four corner pixels:
/// `S(x,y) = S(x-1,y) + S(x,y-1) - S(x-1,y-1)
///         + P(x+r,y+r) - P(x-r-1,y+r) - P(x+r,y-r-1) + P(x-r-1,y-r-1)`.
pub fn mean_constant(src: &PixelBuffer, dim: usize) -> Result<PixelBuffer> {
    validate_dim(dim)?;

    let mut out = PixelBuffer::new(src.width(), src.height());
    if src.is_empty() {
        return Ok(out);
    }

    let (w, h) = (src.width() as usize, src.height() as usize);
    let r = (dim / 2) as i64;
    let count = (dim * dim) as i64;
    let p = |x: i64, y: i64| src.pixel_clamped(x, y);

    let mut sums = vec![[0i64; 3]; w * h];

    let mut origin = [0i64; 3];
    for dy in -r..=r {
        for dx in -r..=r {
            add_pixel(&mut origin, p(dx, dy));
        }
    }
    sums[0] = origin;

    for x in 1..w as i64 {
        let mut acc = sums[x as usize - 1];
        for dy in -r..=r {
            add_pixel(&mut acc, p(x + r, dy));
            sub_pixel(&mut acc, p(x - r - 1, dy));
        }
        sums[x as usize] = acc;
    }

    for y in 1..h as i64 {
        let mut acc = sums[(y as usize - 1) * w];
        for dx in -r..=r {
            add_pixel(&mut acc, p(dx, y + r));
            sub_pixel(&mut acc, p(dx, y - r - 1));
        }
        sums[y as usize * w] = acc;
    }

    for y in 1..h {
        for x in 1..w {
            let (xi, yi) = (x as i64, y as i64);
            let mut acc = sums[y * w + x - 1];
            add_sum(&mut acc, sums[(y - 1) * w + x]);
            sub_sum(&mut acc, sums[(y - 1) * w + x - 1]);
            add_pixel(&mut acc, p(xi + r, yi + r));
            sub_pixel(&mut acc, p(xi - r - 1, yi + r));
            sub_pixel(&mut acc, p(xi + r, yi - r - 1));
            add_pixel(&mut acc, p(xi - r - 1, yi - r - 1));
            sums[y * w + x] = acc;
        }
    }

    for y in 0..h {
        for x in 0..w {
            out.set_pixel(x as u32, y as u32, to_pixel(sums[y * w + x], count));
        }
    }

    Ok(out)
}
