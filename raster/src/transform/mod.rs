//! Inverse-mapped geometric transforms.
//!
//! A [`Transform`] holds the forward map from source to destination pixel
//! coordinates. Rendering walks the destination, maps each pixel back through
//! the inverse and samples the source there. The output keeps the source
//! dimensions; destination pixels whose source lies outside the image are
//! black.


use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

use crate::{Bgr, Error, PixelBuffer, Result};

/// Source coordinates this close outside the image still count as inside.
const EDGE_EPSILON: f64 = 1e-9;

/// Filter mode for sampling the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    /// Nearest source pixel after rounding.
    Nearest,
    /// Two 1D linear blends over the four surrounding pixels.
    #[default]
    Bilinear,
}

#[derive(Debug, Clone, Copy)]
pub struct Transform {
    /// Forward map, source to destination.
    pub transform: DAffine2,
    pub filter: FilterMode,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            transform: DAffine2::IDENTITY,
            filter: FilterMode::default(),
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves content by `(dx, dy)`.
    pub fn translate(mut self, dx: f64, dy: f64) -> Self {
        self.transform = DAffine2::from_translation(DVec2::new(dx, dy)) * self.transform;
        self
    }

    /// Rotates by `angle` radians around `center`. With y pointing down a
    /// positive angle turns content clockwise on screen.
    pub fn rotate_around(mut self, angle: f64, center: DVec2) -> Self {
        let rotation = DAffine2::from_translation(center)
            * DAffine2::from_angle(angle)
            * DAffine2::from_translation(-center);
        self.transform = rotation * self.transform;
        self
    }

    /// Scales about the origin.
    pub fn scale(mut self, factor: f64) -> Self {
        self.transform = DAffine2::from_scale(DVec2::splat(factor)) * self.transform;
        self
    }

    /// Scales about `center`, which stays fixed.
    pub fn scale_about(mut self, factor: f64, center: DVec2) -> Self {
        let scaling = DAffine2::from_translation(center)
            * DAffine2::from_scale(DVec2::splat(factor))
            * DAffine2::from_translation(-center);
        self.transform = scaling * self.transform;
        self
    }

    pub fn filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Renders `src` through the transform.
    pub fn apply(&self, src: &PixelBuffer) -> Result<PixelBuffer> {
        let det = self.transform.matrix2.determinant();
        if !det.is_finite() || det.abs() < f64::EPSILON {
            return Err(Error::InvalidArgument(format!(
                "transform is not invertible (determinant {})",
                det
            )));
        }
        let inverse = self.transform.inverse();

        let mut out = PixelBuffer::new(src.width(), src.height());
        if src.is_empty() {
            return Ok(out);
        }

        for y in 0..src.height() {
            for x in 0..src.width() {
                let s = inverse.transform_point2(DVec2::new(x as f64, y as f64));
                let px = match self.filter {
                    FilterMode::Nearest => sample_nearest(src, s),
                    FilterMode::Bilinear => sample_bilinear(src, s),
                };
                out.set_pixel(x, y, px);
            }
        }

        Ok(out)
    }
}

/// Center of the pixel grid, `((W - 1) / 2, (H - 1) / 2)`.
pub fn image_center(src: &PixelBuffer) -> DVec2 {
    DVec2::new(
        (src.width() as f64 - 1.0) / 2.0,
        (src.height() as f64 - 1.0) / 2.0,
    )
}

pub fn translate(src: &PixelBuffer, dx: f64, dy: f64, filter: FilterMode) -> Result<PixelBuffer> {
    Transform::new().translate(dx, dy).filter(filter).apply(src)
}

/// Rotation about the image center.
pub fn rotate(src: &PixelBuffer, angle: f64, filter: FilterMode) -> Result<PixelBuffer> {
    Transform::new()
        .rotate_around(angle, image_center(src))
        .filter(filter)
        .apply(src)
}

/// Scaling about the origin.
pub fn scale(src: &PixelBuffer, factor: f64, filter: FilterMode) -> Result<PixelBuffer> {
    Transform::new().scale(factor).filter(filter).apply(src)
}

/// Scaling about `(cx, cy)`.
pub fn scale_about(
    src: &PixelBuffer,
    factor: f64,
    cx: f64,
    cy: f64,
    filter: FilterMode,
) -> Result<PixelBuffer> {
    Transform::new()
        .scale_about(factor, DVec2::new(cx, cy))
        .filter(filter)
        .apply(src)
}

/// Resamples `src` to `width` x `height`, mapping pixel centers onto pixel
/// centers and clamping at the edges.
pub fn resize(src: &PixelBuffer, width: u32, height: u32, filter: FilterMode) -> Result<PixelBuffer> {
    if src.is_empty() && width > 0 && height > 0 {
        return Err(Error::InvalidArgument(format!(
            "cannot resize an empty {} buffer to {}x{}",
            src.desc(),
            width,
            height
        )));
    }

    let mut out = PixelBuffer::new(width, height);
    let sx = src.width() as f64 / width.max(1) as f64;
    let sy = src.height() as f64 / height.max(1) as f64;
    let max_x = src.width() as f64 - 1.0;
    let max_y = src.height() as f64 - 1.0;

    for y in 0..height {
        let fy = ((y as f64 + 0.5) * sy - 0.5).clamp(0.0, max_y);
        for x in 0..width {
            let fx = ((x as f64 + 0.5) * sx - 0.5).clamp(0.0, max_x);
            let s = DVec2::new(fx, fy);
            let px = match filter {
                FilterMode::Nearest => sample_nearest(src, s),
                FilterMode::Bilinear => sample_bilinear(src, s),
            };
            out.set_pixel(x, y, px);
        }
    }

    Ok(out)
}

fn sample_nearest(src: &PixelBuffer, s: DVec2) -> Bgr {
    let x = s.x.round() as i64;
    let y = s.y.round() as i64;
    src.get(x, y).unwrap_or(Bgr::BLACK)
}

/// Black outside `[0, W) x [0, H)`; inside, the right and lower neighbors
/// are clamped to the last column and row.
fn sample_bilinear(src: &PixelBuffer, s: DVec2) -> Bgr {
    let w = src.width() as f64;
    let h = src.height() as f64;
    if s.x < -EDGE_EPSILON || s.y < -EDGE_EPSILON || s.x >= w || s.y >= h || s.is_nan() {
        return Bgr::BLACK;
    }

    let x = s.x.max(0.0);
    let y = s.y.max(0.0);
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let (x0, y0) = (x0 as i64, y0 as i64);
    let p00 = src.pixel_clamped(x0, y0).to_array();
    let p10 = src.pixel_clamped(x0 + 1, y0).to_array();
    let p01 = src.pixel_clamped(x0, y0 + 1).to_array();
    let p11 = src.pixel_clamped(x0 + 1, y0 + 1).to_array();

    let mut out = [0u8; 3];
    for ch in 0..3 {
        let top = p00[ch] as f64 + (p10[ch] as f64 - p00[ch] as f64) * fx;
        let bottom = p01[ch] as f64 + (p11[ch] as f64 - p01[ch] as f64) * fx;
        let value = top + (bottom - top) * fy;
        out[ch] = value.round().clamp(0.0, 255.0) as u8;
    }
    Bgr::from(out)
}
