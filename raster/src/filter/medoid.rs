use super::validate_dim;
use crate::{Bgr, PixelBuffer, Result};

#[inline]
fn l1_distance(a: Bgr, b: Bgr) -> u32 {
    a.b.abs_diff(b.b) as u32 + a.g.abs_diff(b.g) as u32 + a.r.abs_diff(b.r) as u32
}

/// Color medoid filter: each pixel becomes the window member with the
/// smallest summed L1 color distance to all other members. The first such
/// member in window raster order wins ties. O(dim⁴) per pixel.
pub fn median_blur_3d(src: &PixelBuffer, dim: usize) -> Result<PixelBuffer> {
    validate_dim(dim)?;

    let mut out = PixelBuffer::new(src.width(), src.height());
    if src.is_empty() {
        return Ok(out);
    }

    let r = (dim / 2) as i64;
    let mut window = Vec::with_capacity(dim * dim);

    for y in 0..src.height() {
        for x in 0..src.width() {
            window.clear();
            for dy in -r..=r {
                for dx in -r..=r {
                    window.push(src.pixel_clamped(x as i64 + dx, y as i64 + dy));
                }
            }

            let mut best = window[0];
            let mut best_cost = u32::MAX;
            for &candidate in &window {
                let cost: u32 = window.iter().map(|&other| l1_distance(candidate, other)).sum();
                if cost < best_cost {
                    best_cost = cost;
                    best = candidate;
                }
            }

            out.set_pixel(x, y, best);
        }
    }

    Ok(out)
}
