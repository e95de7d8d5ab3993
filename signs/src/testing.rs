//! Synthetic scenes and a block digit font for tests.

use raster::{Bgr, PixelBuffer, Point};

use crate::DigitTemplates;

/// 5x7 block glyphs; every glyph touches all four sides of its box.
pub(crate) fn glyph(digit: char) -> [&'static str; 7] {
    match digit {
        '0' => ["#####", "#...#", "#...#", "#...#", "#...#", "#...#", "#####"],
        '1' => ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", "#####"],
        '2' => ["#####", "....#", "....#", "#####", "#....", "#....", "#####"],
        '3' => ["#####", "....#", "....#", "#####", "....#", "....#", "#####"],
        '4' => ["#...#", "#...#", "#...#", "#####", "....#", "....#", "....#"],
        '5' => ["#####", "#....", "#....", "#####", "....#", "....#", "#####"],
        '6' => ["#####", "#....", "#....", "#####", "#...#", "#...#", "#####"],
        '7' => ["#####", "....#", "....#", "...##", "...#.", "...#.", "...#."],
        '8' => ["#####", "#...#", "#...#", "#####", "#...#", "#...#", "#####"],
        _ => ["#####", "#...#", "#...#", "#####", "....#", "....#", "#####"],
    }
}

/// Draws `digit` in `color` with its top-left corner at `origin`, each font
/// cell `scale` pixels wide.
pub(crate) fn draw_glyph(target: &mut PixelBuffer, digit: char, origin: Point, scale: u32, color: Bgr) {
    for (gy, row) in glyph(digit).iter().enumerate() {
        for (gx, cell) in row.bytes().enumerate() {
            if cell != b'#' {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let x = origin.x as u32 + gx as u32 * scale + dx;
                    let y = origin.y as u32 + gy as u32 * scale + dy;
                    target.set_pixel(x, y, color);
                }
            }
        }
    }
}

/// Black digit on white, cropped tight to the glyph.
pub(crate) fn glyph_image(digit: char, scale: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new_filled(5 * scale, 7 * scale, Bgr::WHITE);
    draw_glyph(&mut image, digit, Point::new(0, 0), scale, Bgr::BLACK);
    image
}

/// Templates for all ten digits rendered at scale 4.
pub(crate) fn font_templates() -> DigitTemplates {
    let images = ('0'..='9').map(|d| (d, glyph_image(d, 4)));
    match DigitTemplates::from_images(images) {
        Ok(templates) => templates,
        Err(e) => panic!("font templates must build: {}", e),
    }
}

pub(crate) const SCENE_SIZE: u32 = 200;
pub(crate) const RING_OUTER: f64 = 80.0;
pub(crate) const RING_INNER: f64 = 62.0;
pub(crate) const DIGIT_SCALE: u32 = 6;

/// White scene with a red ring centered in it.
pub(crate) fn ring_scene() -> PixelBuffer {
    let c = (SCENE_SIZE as f64 - 1.0) / 2.0;
    PixelBuffer::from_fn(SCENE_SIZE, SCENE_SIZE, |x, y| {
        let d = ((x as f64 - c).powi(2) + (y as f64 - c).powi(2)).sqrt();
        if (RING_INNER..=RING_OUTER).contains(&d) {
            Bgr::RED
        } else {
            Bgr::WHITE
        }
    })
}

/// Ring scene with `digits` written inside in black, tops aligned, left to right.
pub(crate) fn speed_sign_scene(digits: &str) -> PixelBuffer {
    let mut scene = ring_scene();
    let glyph_w = 5 * DIGIT_SCALE;
    let gap = DIGIT_SCALE;
    let count = digits.chars().count() as u32;
    let total_w = count * glyph_w + count.saturating_sub(1) * gap;

    let x0 = SCENE_SIZE / 2 - total_w / 2;
    let y0 = SCENE_SIZE / 2 - 7 * DIGIT_SCALE / 2;
    for (i, digit) in digits.chars().enumerate() {
        let origin = Point::new((x0 + i as u32 * (glyph_w + gap)) as i32, y0 as i32);
        draw_glyph(&mut scene, digit, origin, DIGIT_SCALE, Bgr::BLACK);
    }
    scene
}

/// White scene with a filled red equilateral triangle, point up.
pub(crate) fn triangle_scene() -> PixelBuffer {
    let side = 140.0;
    let height = side * 3f64.sqrt() / 2.0;
    let top = 30.0;
    let cx = SCENE_SIZE as f64 / 2.0;
    PixelBuffer::from_fn(SCENE_SIZE, SCENE_SIZE, |x, y| {
        let (x, y) = (x as f64, y as f64);
        let t = (y - top) / height;
        if (0.0..=1.0).contains(&t) && (x - cx).abs() <= t * side / 2.0 {
            Bgr::RED
        } else {
            Bgr::WHITE
        }
    })
}

/// Paints `color` over the given rectangle.
pub(crate) fn fill_rect(target: &mut PixelBuffer, x0: u32, y0: u32, w: u32, h: u32, color: Bgr) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            target.set_pixel(x, y, color);
        }
    }
}
