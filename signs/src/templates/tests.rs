use std::path::Path;

use raster::Bgr;

use super::*;
use crate::testing::{font_templates, glyph_image};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_from_images_negates_and_binarizes() {
    let templates = font_templates();
    assert_eq!(templates.len(), 10);

    let (digit, zero) = templates.iter().next().unwrap();
    assert_eq!(digit, '0');
    assert_eq!((zero.width(), zero.height()), (20, 28));
    // Ink becomes white, the hole of the zero stays black
    assert_eq!(zero.pixel(0, 0), Bgr::WHITE);
    assert_eq!(zero.pixel(10, 14), Bgr::BLACK);
}

#[test]
fn test_from_images_crops_margin() {
    let mut padded = PixelBuffer::new_filled(40, 50, Bgr::WHITE);
    let glyph = glyph_image('4', 4);
    for (p, px) in glyph.pixels() {
        padded.set_pixel(p.x as u32 + 7, p.y as u32 + 9, px);
    }

    let templates = DigitTemplates::from_images([('4', padded)]).unwrap();
    let (_, template) = templates.iter().next().unwrap();
    assert_eq!((template.width(), template.height()), (20, 28));
}

#[test]
fn test_rejects_non_digit() {
    let result = DigitTemplates::from_images([('x', glyph_image('1', 2))]);
    assert!(matches!(result, Err(Error::InvalidTemplate { digit: 'x', .. })));
}

#[test]
fn test_rejects_empty_image() {
    let result = DigitTemplates::from_binary([('3', PixelBuffer::new(0, 0))]);
    assert!(matches!(result, Err(Error::InvalidTemplate { digit: '3', .. })));
}

#[test]
fn test_load_dir_without_templates() {
    let result = DigitTemplates::load_dir(Path::new("/nonexistent/signs/templates"));
    assert!(matches!(result, Err(Error::NoTemplates { .. })));
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn test_best_match_at_larger_scale() {
    let templates = font_templates();
    for digit in '0'..='9' {
        let crop = negate(&glyph_image(digit, 6));
        let (found, score) = templates.best_match(&crop).unwrap().unwrap();
        assert_eq!(found, digit);
        assert!((score - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_best_match_solid_block_scores_low() {
    let templates = font_templates();
    let block = PixelBuffer::new_filled(30, 42, Bgr::WHITE);
    let (_, score) = templates.best_match(&block).unwrap().unwrap();
    assert!(score < 0.7, "score {}", score);
}

#[test]
fn test_best_match_without_templates() {
    let templates = DigitTemplates::default();
    let crop = PixelBuffer::new_filled(5, 7, Bgr::WHITE);
    assert_eq!(templates.best_match(&crop).unwrap(), None);
}
