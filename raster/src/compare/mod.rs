//! Whole-buffer comparison and masking.


use crate::{Bgr, PixelBuffer, Result};

/// Fraction of positions where both buffers hold exactly the same pixel.
/// Empty buffers score 0.
pub fn similarity(a: &PixelBuffer, b: &PixelBuffer) -> Result<f64> {
    a.ensure_same_size(b)?;

    let total = a.desc().pixel_count();
    if total == 0 {
        return Ok(0.0);
    }

    let equal = a
        .pixels()
        .zip(b.pixels())
        .filter(|((_, pa), (_, pb))| pa == pb)
        .count();

    Ok(equal as f64 / total as f64)
}

/// Copy of `src` where every pixel whose `mask` pixel is not white is
/// replaced by `fill`.
pub fn apply_mask(src: &PixelBuffer, mask: &PixelBuffer, fill: Bgr) -> Result<PixelBuffer> {
    src.ensure_same_size(mask)?;

    let mut out = src.clone();
    for y in 0..src.height() {
        for x in 0..src.width() {
            if !mask.pixel(x, y).is_white() {
                out.set_pixel(x, y, fill);
            }
        }
    }
    Ok(out)
}
