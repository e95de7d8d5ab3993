use crate::{Bgr, PixelBuffer, Result};

#[inline]
fn saturate(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[inline]
fn channels(px: Bgr) -> [i32; 3] {
    [px.b as i32, px.g as i32, px.r as i32]
}

#[inline]
fn abs_diff(a: Bgr, b: Bgr) -> [i32; 3] {
    let (a, b) = (channels(a), channels(b));
    [(a[0] - b[0]).abs(), (a[1] - b[1]).abs(), (a[2] - b[2]).abs()]
}

/// Copy of `src` with a one-pixel replicated border, packed as channel triples.
fn replicate_padded(src: &PixelBuffer) -> (Vec<[i32; 3]>, usize) {
    let pw = src.width() as usize + 2;
    let ph = src.height() as usize + 2;
    let mut padded = Vec::with_capacity(pw * ph);
    for y in 0..ph as i64 {
        for x in 0..pw as i64 {
            padded.push(channels(src.pixel_clamped(x - 1, y - 1)));
        }
    }
    (padded, pw)
}

/// `|Gx| + |Gy|` with the 3x3 Sobel kernels, clamped to a byte.
pub fn sobel(src: &PixelBuffer) -> Result<PixelBuffer> {
    let mut out = PixelBuffer::new(src.width(), src.height());
    if src.is_empty() {
        return Ok(out);
    }

    let (p, pw) = replicate_padded(src);

    for y in 0..src.height() as usize {
        // Row starts of the three padded rows around output row y
        let up = y * pw;
        let mid = (y + 1) * pw;
        let down = (y + 2) * pw;

        for x in 0..src.width() as usize {
            let (l, c, r) = (x, x + 1, x + 2);
            let mut value = [0u8; 3];
            for ch in 0..3 {
                let gx = p[up + r][ch] + 2 * p[mid + r][ch] + p[down + r][ch]
                    - p[up + l][ch]
                    - 2 * p[mid + l][ch]
                    - p[down + l][ch];
                let gy = p[down + l][ch] + 2 * p[down + c][ch] + p[down + r][ch]
                    - p[up + l][ch]
                    - 2 * p[up + c][ch]
                    - p[up + r][ch];
                value[ch] = saturate(gx.abs() + gy.abs());
            }
            out.set_pixel(x as u32, y as u32, Bgr::from(value));
        }
    }

    Ok(out)
}

/// `|p - right| + |p - below|`, replicating the last column and row.
pub fn differentiation(src: &PixelBuffer) -> Result<PixelBuffer> {
    let mut out = PixelBuffer::new(src.width(), src.height());

    for y in 0..src.height() {
        for x in 0..src.width() {
            let p = src.pixel(x, y);
            let right = src.pixel_clamped(x as i64 + 1, y as i64);
            let below = src.pixel_clamped(x as i64, y as i64 + 1);
            let (dr, db) = (abs_diff(p, right), abs_diff(p, below));
            out.set_pixel(
                x,
                y,
                Bgr::new(saturate(dr[0] + db[0]), saturate(dr[1] + db[1]), saturate(dr[2] + db[2])),
            );
        }
    }

    Ok(out)
}

/// Roberts cross: `|p(x,y) - p(x+1,y+1)| + |p(x+1,y) - p(x,y+1)|`.
///
/// On the last column both diagonals collapse to the vertical difference,
/// and on the last row to the horizontal one, so those pixels use twice the
/// single difference. The bottom-right pixel is 0.
pub fn roberts(src: &PixelBuffer) -> Result<PixelBuffer> {
    let mut out = PixelBuffer::new(src.width(), src.height());
    if src.is_empty() {
        return Ok(out);
    }

    let last_x = src.width() - 1;
    let last_y = src.height() - 1;

    for y in 0..src.height() {
        for x in 0..src.width() {
            let p = src.pixel(x, y);
            let value = match (x == last_x, y == last_y) {
                (false, false) => {
                    let d1 = abs_diff(p, src.pixel(x + 1, y + 1));
                    let d2 = abs_diff(src.pixel(x + 1, y), src.pixel(x, y + 1));
                    [d1[0] + d2[0], d1[1] + d2[1], d1[2] + d2[2]]
                }
                (true, false) => abs_diff(p, src.pixel(x, y + 1)).map(|d| 2 * d),
                (false, true) => abs_diff(p, src.pixel(x + 1, y)).map(|d| 2 * d),
                (true, true) => [0; 3],
            };
            out.set_pixel(x, y, Bgr::new(saturate(value[0]), saturate(value[1]), saturate(value[2])));
        }
    }

    Ok(out)
}
