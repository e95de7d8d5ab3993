use super::border::{visit_regions, Region};
use super::round_channel;
use crate::{Bgr, Error, PixelBuffer, Result, CHANNELS};

/// Elements closer than this to the rank-one reconstruction count as equal.
const SEPARABLE_TOLERANCE: f64 = 1e-9;

/// Odd-sized convolution matrix stored row by row.
///
/// Applied as a correlation: element `(col, row)` weighs the pixel at
/// `(x + col - cols / 2, y + row - rows / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    cols: usize,
    rows: usize,
    values: Vec<f64>,
}

impl Kernel {
    pub fn new(cols: usize, rows: usize, values: Vec<f64>) -> Result<Self> {
        if cols % 2 == 0 || rows % 2 == 0 {
            return Err(Error::InvalidKernel(format!(
                "kernel dimensions must be odd, got {}x{}",
                cols, rows
            )));
        }
        if values.len() != cols * rows {
            return Err(Error::InvalidKernel(format!(
                "expected {} values for a {}x{} kernel, got {}",
                cols * rows,
                cols,
                rows,
                values.len()
            )));
        }
        Ok(Self { cols, rows, values })
    }

    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.len());
        if rows.iter().any(|row| row.len() != cols) {
            return Err(Error::InvalidKernel("kernel rows differ in length".to_string()));
        }
        Self::new(cols, rows.len(), rows.concat())
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, col: usize, row: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Splits the kernel into a column factor `u` (one entry per row) and a
    /// row factor `v` (one entry per column) with `m[row][col] = u[row] * v[col]`,
    /// or `None` if it is not an outer product.
    pub fn separable_factors(&self) -> Option<(Vec<f64>, Vec<f64>)> {
        let pivot = self.values.iter().position(|v| v.abs() > SEPARABLE_TOLERANCE)?;
        let (pivot_row, pivot_col) = (pivot / self.cols, pivot % self.cols);
        let pivot_value = self.values[pivot];

        let u: Vec<f64> = (0..self.rows).map(|row| self.get(pivot_col, row)).collect();
        let v: Vec<f64> = (0..self.cols)
            .map(|col| self.get(col, pivot_row) / pivot_value)
            .collect();

        for row in 0..self.rows {
            for col in 0..self.cols {
                if (self.get(col, row) - u[row] * v[col]).abs() > SEPARABLE_TOLERANCE {
                    return None;
                }
            }
        }

        Some((u, v))
    }
}

/// General linear filter: `round(sum(m * p) / weight + offset)`, clamped
/// to a byte. Separable kernels run as two 1D passes.
pub fn non_uniform(src: &PixelBuffer, kernel: &Kernel, weight: f64, offset: f64) -> Result<PixelBuffer> {
    if weight == 0.0 || !weight.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "kernel weight must be finite and non-zero, got {}",
            weight
        )));
    }

    if src.is_empty() {
        return Ok(PixelBuffer::new(src.width(), src.height()));
    }

    match kernel.separable_factors() {
        Some((u, v)) => Ok(convolve_separable(src, &u, &v, weight, offset)),
        None => Ok(convolve_direct(src, kernel, weight, offset)),
    }
}

#[inline]
fn finish(sum: [f64; 3], weight: f64, offset: f64) -> Bgr {
    Bgr::new(
        round_channel(sum[0] / weight + offset),
        round_channel(sum[1] / weight + offset),
        round_channel(sum[2] / weight + offset),
    )
}

pub(crate) fn convolve_separable(
    src: &PixelBuffer,
    u: &[f64],
    v: &[f64],
    weight: f64,
    offset: f64,
) -> PixelBuffer {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let cx = (v.len() / 2) as i64;
    let cy = (u.len() / 2) as i64;

    let mut horizontal = vec![[0.0f64; 3]; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f64; 3];
            for (j, &m) in v.iter().enumerate() {
                let px = src.pixel_clamped(x as i64 + j as i64 - cx, y as i64);
                acc[0] += m * px.b as f64;
                acc[1] += m * px.g as f64;
                acc[2] += m * px.r as f64;
            }
            horizontal[y * w + x] = acc;
        }
    }

    let mut out = PixelBuffer::new(src.width(), src.height());
    let last_row = h as i64 - 1;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f64; 3];
            for (i, &m) in u.iter().enumerate() {
                let row = (y as i64 + i as i64 - cy).clamp(0, last_row) as usize;
                let partial = horizontal[row * w + x];
                acc[0] += m * partial[0];
                acc[1] += m * partial[1];
                acc[2] += m * partial[2];
            }
            out.set_pixel(x as u32, y as u32, finish(acc, weight, offset));
        }
    }
    out
}

pub(crate) fn convolve_direct(src: &PixelBuffer, kernel: &Kernel, weight: f64, offset: f64) -> PixelBuffer {
    let mut out = PixelBuffer::new(src.width(), src.height());
    let cx = kernel.cols / 2;
    let cy = kernel.rows / 2;
    let stride = src.stride();
    let bytes = src.bytes();

    visit_regions(
        src.width() as usize,
        src.height() as usize,
        cx,
        cy,
        |x, y, region| {
            let mut acc = [0.0f64; 3];
            for row in 0..kernel.rows {
                for col in 0..kernel.cols {
                    let m = kernel.get(col, row);
                    let px = match region {
                        Region::Interior => {
                            let i = (y + row - cy) * stride + (x + col - cx) * CHANNELS;
                            Bgr::new(bytes[i], bytes[i + 1], bytes[i + 2])
                        }
                        Region::Border => src.pixel_clamped(
                            x as i64 + col as i64 - cx as i64,
                            y as i64 + row as i64 - cy as i64,
                        ),
                    };
                    acc[0] += m * px.b as f64;
                    acc[1] += m * px.g as f64;
                    acc[2] += m * px.r as f64;
                }
            }
            out.set_pixel(x as u32, y as u32, finish(acc, weight, offset));
        },
    );
    out
}
