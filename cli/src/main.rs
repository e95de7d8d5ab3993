//! Detects traffic signs in an image file.
//!
//! # Usage
//!
//! ```bash
//! signs <image> <templates_dir> [config.yaml] [labels.png]
//! ```
//!
//! `templates_dir` holds `0.png` through `9.png`, dark digits on a light
//! background. The optional YAML file overrides any [`DetectorConfig`] field.
//! When `labels.png` is given, the red regions are written there, one color
//! per region. Set `RUST_LOG` to change verbosity; logs also go to `logs/`.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use raster::threshold::binarize_on_color;
use raster::PixelBuffer;
use signs::{label, DetectorConfig, DigitTemplates, SignDetector};

struct Args {
    image: PathBuf,
    templates: PathBuf,
    config: Option<PathBuf>,
    labels: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = env::args().skip(1);
    let (Some(image), Some(templates)) = (args.next(), args.next()) else {
        bail!("usage: signs <image> <templates_dir> [config.yaml] [labels.png]");
    };

    Ok(Args {
        image: image.into(),
        templates: templates.into(),
        config: args.next().map(PathBuf::from),
        labels: args.next().map(PathBuf::from),
    })
}

fn load_config(path: Option<&Path>) -> Result<DetectorConfig> {
    let Some(path) = path else {
        return Ok(DetectorConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_yml::from_str(&text).with_context(|| format!("Failed to parse config {}", path.display()))
}

fn load_image(path: &Path) -> Result<PixelBuffer> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgb8();
    let buffer = PixelBuffer::from_rgb(decoded.width(), decoded.height(), decoded.as_raw())?;
    tracing::info!(path = %path.display(), size = %buffer.desc(), "Image loaded");
    Ok(buffer)
}

fn save_labels(path: &Path, image: &PixelBuffer, config: &DetectorConfig) -> Result<()> {
    let mask = binarize_on_color(image, &config.red_range);
    let colored = label(&mask, config.connectivity).render_colored();
    image::save_buffer(
        path,
        &colored.to_rgb_bytes(),
        colored.width(),
        colored.height(),
        image::ExtendedColorType::Rgb8,
    )
    .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Region labels written");
    Ok(())
}

fn main() -> Result<()> {
    common::log_setup::setup_logging("info", Path::new("logs"))?;

    let args = parse_args()?;
    let config = load_config(args.config.as_deref())?;
    let templates = DigitTemplates::load_dir(&args.templates)
        .with_context(|| format!("Failed to load templates from {}", args.templates.display()))?;
    let detector = SignDetector::from_config(config, templates)?;

    let image = load_image(&args.image)?;
    let result = detector.detect(&image)?;

    for sign in &result.signs {
        println!("{}", sign);
        for digit in &sign.digits {
            println!("  '{}' {} score {:.3}", digit.value, digit.bounds, digit.score);
        }
    }
    let d = &result.diagnostics;
    tracing::info!(
        red_regions = d.red_regions,
        rejected_small = d.rejected_small,
        circular = d.circular,
        danger = d.danger,
        prohibition = d.prohibition,
        speed_limit = d.speed_limit,
        "Detection finished"
    );

    if let Some(path) = &args.labels {
        save_labels(path, &image, detector.config())?;
    }

    Ok(())
}
