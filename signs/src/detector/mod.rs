//! Sign detection pipeline.
//!
//! Red regions are segmented, cleaned up morphologically and labeled. Each
//! region large enough to matter is classified by circularity: angular
//! regions are danger signs, round ones have their interior searched for
//! digits, which decide between speed-limit and prohibition.


use raster::color::{extract_channel, negate, Channel};
use raster::compare::apply_mask;
use raster::morphology::{close, open, StructuringElement};
use raster::threshold::{binarize, binarize_on_color};
use raster::{Bgr, PixelBuffer};

use crate::component::ConnectedComponent;
use crate::labeling::{filter_min_area, label};
use crate::{DetectorConfig, Digit, DigitTemplates, Result, Sign, SignKind};

/// Counters from one [`SignDetector::detect`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Red regions found after morphology.
    pub red_regions: usize,
    /// Regions dropped by the minimum area.
    pub rejected_small: usize,
    /// Regions classified as round.
    pub circular: usize,
    pub danger: usize,
    pub prohibition: usize,
    pub speed_limit: usize,
}

#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// In the raster order of the regions they came from.
    pub signs: Vec<Sign>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct SignDetector {
    config: DetectorConfig,
    templates: DigitTemplates,
}

impl SignDetector {
    /// Detector with the default configuration.
    pub fn new(templates: DigitTemplates) -> Self {
        Self {
            config: DetectorConfig::default(),
            templates,
        }
    }

    pub fn from_config(config: DetectorConfig, templates: DigitTemplates) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, templates })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn templates(&self) -> &DigitTemplates {
        &self.templates
    }

    pub fn detect(&self, image: &PixelBuffer) -> Result<DetectionResult> {
        let config = &self.config;
        let element = StructuringElement::full(config.morph_size)?;
        let mut diagnostics = Diagnostics::default();

        // Step 1: red mask
        let mask = binarize_on_color(image, &config.red_range);

        // Step 2: bridge small gaps, then drop specks
        let mask = open(&close(&mask, &element), &element);

        // Step 3: regions
        let regions = label(&mask, config.connectivity).into_components();
        diagnostics.red_regions = regions.len();

        let min_area = (config.min_area_fraction * image.desc().pixel_count() as f64).ceil() as usize;
        let regions = filter_min_area(regions, min_area);
        diagnostics.rejected_small = diagnostics.red_regions - regions.len();
        tracing::debug!(
            "Found {} red regions, {} below {} pixels",
            diagnostics.red_regions,
            diagnostics.rejected_small,
            min_area
        );

        // Step 4: shape
        let mut signs = Vec::with_capacity(regions.len());
        for region in &regions {
            let circularity = region.circularity();
            let bounds = region.bounding_box();
            tracing::trace!("Region {} circularity {:.3}", bounds, circularity);

            let sign = if circularity > config.circularity_threshold {
                diagnostics.circular += 1;
                self.classify_round(image, region, &element)?
            } else {
                Sign {
                    kind: SignKind::Danger,
                    bounds,
                    digits: Vec::new(),
                }
            };

            match sign.kind {
                SignKind::Danger => diagnostics.danger += 1,
                SignKind::Prohibition => diagnostics.prohibition += 1,
                SignKind::SpeedLimit => diagnostics.speed_limit += 1,
                SignKind::Unknown => {}
            }
            signs.push(sign);
        }

        tracing::debug!(
            "Detected {} signs: {} danger, {} prohibition, {} speed limit",
            signs.len(),
            diagnostics.danger,
            diagnostics.prohibition,
            diagnostics.speed_limit
        );

        Ok(DetectionResult { signs, diagnostics })
    }

    /// Steps 5 and 6: look for digits inside the hull of a round region.
    fn classify_round(
        &self,
        image: &PixelBuffer,
        region: &ConnectedComponent,
        element: &StructuringElement,
    ) -> Result<Sign> {
        let config = &self.config;
        let bounds = region.bounding_box();
        let prohibition = Sign {
            kind: SignKind::Prohibition,
            bounds,
            digits: Vec::new(),
        };

        // Only the inside of the sign survives; the rest turns white
        let mut hull_mask = PixelBuffer::new(image.width(), image.height());
        for p in region.hull_interior() {
            hull_mask.set_pixel(p.x as u32, p.y as u32, Bgr::WHITE);
        }
        let inside = apply_mask(image, &hull_mask, Bgr::WHITE)?;

        // Dark ink has a low red channel; white and red paper both read high
        let ink = negate(&extract_channel(&inside, Channel::Red));
        let ink = open(&binarize(&ink, config.digit_level), element);

        let glyphs = label(&ink, config.digit_connectivity).into_components();
        if !(config.min_digits..=config.max_digits).contains(&glyphs.len()) {
            tracing::trace!("Region {} holds {} glyphs", bounds, glyphs.len());
            return Ok(prohibition);
        }

        let mut digits = Vec::with_capacity(glyphs.len());
        for glyph in &glyphs {
            let glyph_bounds = glyph.bounding_box();
            let crop = ink.crop(glyph_bounds)?;
            let Some((value, score)) = self.templates.best_match(&crop)? else {
                break;
            };
            if score < config.min_match_score {
                tracing::trace!("Glyph {} best match '{}' scored {:.3}", glyph_bounds, value, score);
                break;
            }
            digits.push(Digit {
                value,
                bounds: glyph_bounds,
                score,
            });
        }

        if digits.len() != glyphs.len() || !digits.iter().any(|d| d.value == config.required_digit) {
            return Ok(prohibition);
        }

        Ok(Sign {
            kind: SignKind::SpeedLimit,
            bounds,
            digits,
        })
    }
}
