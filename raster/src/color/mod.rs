//! Color-space conversion between BGR, YCrCb and HSV, plus single-channel
//! helpers.
//!
//! The scalar conversions work on `f64` triples for any supported [`Depth`];
//! the buffer conversions are the 8-bit specializations. Converted buffers
//! store their channels in the slots a BGR buffer would use: YCrCb keeps
//! `(Y, Cr, Cb)` and HSV keeps `(H / 2, S, V)`, so an 8-bit hue spans 0..180.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::{Bgr, Depth, PixelBuffer, Result};

const CHROMA_OFFSET_U8: f64 = 128.0;

/// One channel of a BGR buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Blue,
    Green,
    Red,
}

impl Channel {
    pub fn of(self, pixel: Bgr) -> u8 {
        match self {
            Channel::Blue => pixel.b,
            Channel::Green => pixel.g,
            Channel::Red => pixel.r,
        }
    }
}

// ============================================================================
// Scalar conversions
// ============================================================================

/// `[b, g, r]` to `[y, cr, cb]`.
pub fn ycrcb_from_bgr(bgr: [f64; 3], depth: Depth) -> Result<[f64; 3]> {
    let delta = depth.chroma_offset()?;
    Ok(ycrcb_forward(bgr, delta))
}

/// `[y, cr, cb]` to `[b, g, r]`.
pub fn bgr_from_ycrcb(ycrcb: [f64; 3], depth: Depth) -> Result<[f64; 3]> {
    let delta = depth.chroma_offset()?;
    Ok(ycrcb_inverse(ycrcb, delta))
}

/// `[b, g, r]` to `[h, s, v]` with hue in degrees `[0, 360)`, saturation
/// scaled to the depth's full scale and value in channel units.
pub fn hsv_from_bgr(bgr: [f64; 3], depth: Depth) -> Result<[f64; 3]> {
    let scale = depth.full_scale()?;
    Ok(hsv_forward(bgr, scale))
}

/// Inverse of [`hsv_from_bgr`].
pub fn bgr_from_hsv(hsv: [f64; 3], depth: Depth) -> Result<[f64; 3]> {
    let scale = depth.full_scale()?;
    Ok(hsv_inverse(hsv, scale))
}

fn ycrcb_forward([b, g, r]: [f64; 3], delta: f64) -> [f64; 3] {
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cr = (r - y) * 0.713 + delta;
    let cb = (b - y) * 0.564 + delta;
    [y, cr, cb]
}

fn ycrcb_inverse([y, cr, cb]: [f64; 3], delta: f64) -> [f64; 3] {
    let r = y + 1.403 * (cr - delta);
    let g = y - 0.714 * (cr - delta) - 0.344 * (cb - delta);
    let b = y + 1.773 * (cb - delta);
    [b, g, r]
}

fn hsv_forward([b, g, r]: [f64; 3], scale: f64) -> [f64; 3] {
    let v = b.max(g).max(r);
    let min = b.min(g).min(r);
    let diff = v - min;

    let s = if v > 0.0 { diff / v * scale } else { 0.0 };

    let mut h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    [h, s, v]
}

fn hsv_inverse([h, s, v]: [f64; 3], scale: f64) -> [f64; 3] {
    let s = s / scale;
    let h = h.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [b, g, r]
}

#[inline]
fn to_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn to_bgr(values: [f64; 3]) -> Bgr {
    Bgr::new(to_u8(values[0]), to_u8(values[1]), to_u8(values[2]))
}

#[inline]
fn as_f64(pixel: Bgr) -> [f64; 3] {
    [pixel.b as f64, pixel.g as f64, pixel.r as f64]
}

// ============================================================================
// Buffer conversions
// ============================================================================

pub fn bgr_to_ycrcb(src: &PixelBuffer) -> PixelBuffer {
    src.map(|px| to_bgr(ycrcb_forward(as_f64(px), CHROMA_OFFSET_U8)))
}

pub fn ycrcb_to_bgr(src: &PixelBuffer) -> PixelBuffer {
    src.map(|px| to_bgr(ycrcb_inverse(as_f64(px), CHROMA_OFFSET_U8)))
}

pub fn bgr_to_hsv(src: &PixelBuffer) -> PixelBuffer {
    src.map(|px| {
        let [h, s, v] = hsv_forward(as_f64(px), 255.0);
        // 360 degrees rounds to 180, which is the same hue as 0
        let h = (h / 2.0).round() as u32 % 180;
        Bgr::new(h as u8, to_u8(s), to_u8(v))
    })
}

pub fn hsv_to_bgr(src: &PixelBuffer) -> PixelBuffer {
    src.map(|px| {
        let hsv = [px.b as f64 * 2.0, px.g as f64, px.r as f64];
        to_bgr(hsv_inverse(hsv, 255.0))
    })
}

/// Luma replicated into all three channels.
pub fn to_gray(src: &PixelBuffer) -> PixelBuffer {
    src.map(|px| Bgr::gray(px.luma()))
}

/// One channel replicated into all three.
pub fn extract_channel(src: &PixelBuffer, channel: Channel) -> PixelBuffer {
    src.map(|px| Bgr::gray(channel.of(px)))
}

pub fn negate(src: &PixelBuffer) -> PixelBuffer {
    src.map(|px| Bgr::new(255 - px.b, 255 - px.g, 255 - px.r))
}
