//! Detector configuration.
//!
//! Every threshold the pipeline uses lives here so that a YAML file can
//! override any of them; missing fields keep their defaults.

use raster::threshold::HsvRange;
use serde::{Deserialize, Serialize};

use crate::{Connectivity, Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    // ------------------------------------------------------------------------
    // Segmentation
    // ------------------------------------------------------------------------
    /// Red in 8-bit HSV units. The hue range wraps through 0.
    pub red_range: HsvRange,
    /// Side of the square element used for closing and opening.
    pub morph_size: usize,
    pub connectivity: Connectivity,
    /// Regions smaller than this fraction of the image are dropped.
    pub min_area_fraction: f64,

    // ------------------------------------------------------------------------
    // Shape
    // ------------------------------------------------------------------------
    /// Regions above this circularity are treated as round signs.
    pub circularity_threshold: f64,

    // ------------------------------------------------------------------------
    // Digits
    // ------------------------------------------------------------------------
    /// Negated red channel level at or above which a pixel is digit ink.
    pub digit_level: u8,
    pub digit_connectivity: Connectivity,
    pub min_digits: usize,
    pub max_digits: usize,
    /// Recognition stops at the first digit scoring below this.
    pub min_match_score: f64,
    /// Speed limits always contain this digit.
    pub required_digit: char,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            red_range: HsvRange {
                hue_low: 170,
                hue_high: 5,
                sat_low: 100,
                sat_high: 255,
                val_low: 80,
                val_high: 255,
            },
            morph_size: 3,
            connectivity: Connectivity::Eight,
            min_area_fraction: 0.001,
            circularity_threshold: 0.65,
            digit_level: 190,
            digit_connectivity: Connectivity::Eight,
            min_digits: 2,
            max_digits: 3,
            min_match_score: 0.7,
            required_digit: '0',
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.red_range.hue_low >= 180 || self.red_range.hue_high >= 180 {
            return Err(Error::InvalidConfig(format!(
                "hue bounds must be below 180, got {}..{}",
                self.red_range.hue_low, self.red_range.hue_high
            )));
        }
        if self.morph_size == 0 || self.morph_size % 2 == 0 {
            return Err(Error::InvalidConfig(format!(
                "morph_size must be odd and positive, got {}",
                self.morph_size
            )));
        }
        if !(0.0..=1.0).contains(&self.min_area_fraction) {
            return Err(Error::InvalidConfig(format!(
                "min_area_fraction must be within [0, 1], got {}",
                self.min_area_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.circularity_threshold) {
            return Err(Error::InvalidConfig(format!(
                "circularity_threshold must be within [0, 1], got {}",
                self.circularity_threshold
            )));
        }
        if self.min_digits == 0 || self.min_digits > self.max_digits {
            return Err(Error::InvalidConfig(format!(
                "digit count range {}..={} is empty or starts at zero",
                self.min_digits, self.max_digits
            )));
        }
        if !(0.0..=1.0).contains(&self.min_match_score) {
            return Err(Error::InvalidConfig(format!(
                "min_match_score must be within [0, 1], got {}",
                self.min_match_score
            )));
        }
        if !self.required_digit.is_ascii_digit() {
            return Err(Error::InvalidConfig(format!(
                "required_digit must be a decimal digit, got '{}'",
                self.required_digit
            )));
        }
        Ok(())
    }
}
