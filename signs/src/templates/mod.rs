#[cfg(test)]
mod tests;

use std::path::Path;

use raster::color::negate;
use raster::compare::similarity;
use raster::threshold::binarize_otsu;
use raster::transform::{resize, FilterMode};
use raster::{PixelBuffer, Point, Rect};

use crate::{Error, Result};

/// Reference digit images, white glyph on black, in the form digit crops
/// take after sign preprocessing.
#[derive(Debug, Clone, Default)]
pub struct DigitTemplates {
    templates: Vec<(char, PixelBuffer)>,
}

impl DigitTemplates {
    /// Takes dark-on-light digit images, negates them, binarizes each at its
    /// Otsu level and crops away the margin around the glyph.
    pub fn from_images(images: impl IntoIterator<Item = (char, PixelBuffer)>) -> Result<Self> {
        let mut templates = Vec::new();
        for (digit, image) in images {
            validate(digit, &image)?;
            let (binary, level) = binarize_otsu(&negate(&image));
            tracing::trace!("Template '{}' binarized at level {}", digit, level);
            let binary = match ink_bounds(&binary) {
                Some(bounds) => binary.crop(bounds)?,
                None => binary,
            };
            templates.push((digit, binary));
        }
        Ok(Self { templates })
    }

    /// Takes images that are already binarized.
    pub fn from_binary(images: impl IntoIterator<Item = (char, PixelBuffer)>) -> Result<Self> {
        let mut templates = Vec::new();
        for (digit, image) in images {
            validate(digit, &image)?;
            templates.push((digit, image));
        }
        Ok(Self { templates })
    }

    /// Loads `0.png` through `9.png` from `dir`. Missing digits are skipped
    /// with a warning; an empty result is an error.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut images = Vec::new();
        for digit in '0'..='9' {
            let path = dir.join(format!("{}.png", digit));
            if !path.exists() {
                tracing::warn!("No template for digit '{}' at {}", digit, path.display());
                continue;
            }

            let decoded = image::open(&path)
                .map_err(|source| Error::TemplateImage {
                    path: path.clone(),
                    source,
                })?
                .to_rgb8();
            let buffer = PixelBuffer::from_rgb(decoded.width(), decoded.height(), decoded.as_raw())?;
            images.push((digit, buffer));
        }

        if images.is_empty() {
            return Err(Error::NoTemplates {
                path: dir.to_path_buf(),
            });
        }

        tracing::debug!("Loaded {} digit templates from {}", images.len(), dir.display());
        Self::from_images(images)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &PixelBuffer)> {
        self.templates.iter().map(|(digit, image)| (*digit, image))
    }

    /// Scales every template to the crop's size and returns the digit whose
    /// template agrees with the most pixels, with that agreement. The first
    /// template wins ties.
    pub fn best_match(&self, crop: &PixelBuffer) -> Result<Option<(char, f64)>> {
        let mut best: Option<(char, f64)> = None;
        for (digit, template) in self.iter() {
            let scaled = resize(template, crop.width(), crop.height(), FilterMode::Nearest)?;
            let score = similarity(&scaled, crop)?;
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((digit, score));
            }
        }
        Ok(best)
    }
}

/// Bounding box of the white pixels, if any.
fn ink_bounds(binary: &PixelBuffer) -> Option<Rect> {
    let mut corners: Option<(Point, Point)> = None;
    for (p, px) in binary.pixels() {
        if !px.is_white() {
            continue;
        }
        corners = Some(match corners {
            None => (p, p),
            Some((lo, hi)) => (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            ),
        });
    }
    corners.map(|(lo, hi)| Rect::from_corners(lo, hi))
}

fn validate(digit: char, image: &PixelBuffer) -> Result<()> {
    if !digit.is_ascii_digit() {
        return Err(Error::InvalidTemplate {
            digit,
            reason: "not a decimal digit".to_string(),
        });
    }
    if image.is_empty() {
        return Err(Error::InvalidTemplate {
            digit,
            reason: "image is empty".to_string(),
        });
    }
    Ok(())
}
