//! Binarization: manual level, Otsu's automatic level and HSV range tests.
//!
//! Binary buffers use white for foreground and black for background. A pixel
//! is foreground under level `t` when its luma is `>= t`.


use serde::{Deserialize, Serialize};

use crate::color::bgr_to_hsv;
use crate::{Bgr, PixelBuffer};

/// Luma histogram with one bin per level.
pub fn histogram(src: &PixelBuffer) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for (_, px) in src.pixels() {
        hist[px.luma() as usize] += 1;
    }
    hist
}

/// Otsu's level for `hist`.
///
/// For every candidate `t` in `1..=255` the background class is the levels
/// below `t`. The returned level maximizes `wB * wF * (mB - mF)^2`, the
/// lowest one winning ties. A histogram with a single occupied level has no
/// split and yields 0.
pub fn otsu_level(hist: &[u64; 256]) -> u8 {
    let total: u64 = hist.iter().sum();
    let sum_all: u64 = hist.iter().enumerate().map(|(i, &n)| i as u64 * n).sum();

    let mut best_level = 0u8;
    let mut best_variance = 0.0f64;

    let mut weight_bg = 0u64;
    let mut sum_bg = 0u64;

    for t in 1..256usize {
        weight_bg += hist[t - 1];
        sum_bg += (t as u64 - 1) * hist[t - 1];

        let weight_fg = total - weight_bg;
        if weight_bg == 0 || weight_fg == 0 {
            continue;
        }

        let mean_bg = sum_bg as f64 / weight_bg as f64;
        let mean_fg = (sum_all - sum_bg) as f64 / weight_fg as f64;
        let diff = mean_bg - mean_fg;
        let variance = weight_bg as f64 * weight_fg as f64 * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best_level = t as u8;
        }
    }

    best_level
}

/// White where luma `>= level`, black elsewhere.
pub fn binarize(src: &PixelBuffer, level: u8) -> PixelBuffer {
    src.map(|px| {
        if px.luma() >= level {
            Bgr::WHITE
        } else {
            Bgr::BLACK
        }
    })
}

/// Binarizes at Otsu's level and returns the level used.
pub fn binarize_otsu(src: &PixelBuffer) -> (PixelBuffer, u8) {
    let level = otsu_level(&histogram(src));
    tracing::trace!("Otsu level {} for {}", level, src.desc());
    (binarize(src, level), level)
}

/// Inclusive HSV bounds in 8-bit stored units: hue in `0..180`, saturation
/// and value in `0..=255`. When `hue_low > hue_high` the hue range wraps
/// through 0, which is how reds are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub hue_low: u8,
    pub hue_high: u8,
    pub sat_low: u8,
    pub sat_high: u8,
    pub val_low: u8,
    pub val_high: u8,
}

impl HsvRange {
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        let hue_ok = if self.hue_low <= self.hue_high {
            (self.hue_low..=self.hue_high).contains(&h)
        } else {
            h >= self.hue_low || h <= self.hue_high
        };

        hue_ok
            && (self.sat_low..=self.sat_high).contains(&s)
            && (self.val_low..=self.val_high).contains(&v)
    }
}

/// White where the pixel's HSV triple falls inside `range`.
pub fn binarize_on_color(src: &PixelBuffer, range: &HsvRange) -> PixelBuffer {
    bgr_to_hsv(src).map(|px| {
        if range.contains(px.b, px.g, px.r) {
            Bgr::WHITE
        } else {
            Bgr::BLACK
        }
    })
}
