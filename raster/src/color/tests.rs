use super::*;
use crate::Error;

// =============================================================================
// YCrCb
// =============================================================================

#[test]
fn test_ycrcb_gray_has_neutral_chroma() {
    let src = PixelBuffer::new_filled(2, 2, Bgr::gray(90));
    let ycrcb = bgr_to_ycrcb(&src);
    assert!(ycrcb.pixels().all(|(_, px)| px == Bgr::new(90, 128, 128)));
}

#[test]
fn test_ycrcb_round_trip_within_one_level() {
    for b in (0..=255u32).step_by(5) {
        for g in (0..=255u32).step_by(5) {
            for r in (0..=255u32).step_by(5) {
                let px = Bgr::new(b as u8, g as u8, r as u8);
                let src = PixelBuffer::new_filled(1, 1, px);
                let back = ycrcb_to_bgr(&bgr_to_ycrcb(&src)).pixel(0, 0);

                let diff = [
                    (back.b as i32 - px.b as i32).abs(),
                    (back.g as i32 - px.g as i32).abs(),
                    (back.r as i32 - px.r as i32).abs(),
                ];
                assert!(
                    diff.iter().all(|&d| d <= 1),
                    "round trip of {:?} gave {:?}",
                    px,
                    back
                );
            }
        }
    }
}

#[test]
fn test_ycrcb_depth_offsets() {
    let [_, cr, cb] = ycrcb_from_bgr([0.25, 0.25, 0.25], Depth::F32).unwrap();
    assert!((cr - 0.5).abs() < 1e-12);
    assert!((cb - 0.5).abs() < 1e-12);

    let [_, cr, _] = ycrcb_from_bgr([1000.0, 1000.0, 1000.0], Depth::U16).unwrap();
    assert!((cr - 32768.0).abs() < 1e-9);

    let back = bgr_from_ycrcb([1000.0, 32768.0, 32768.0], Depth::U16).unwrap();
    assert!(back.iter().all(|c| (c - 1000.0).abs() < 1e-9));
}

#[test]
fn test_ycrcb_unsupported_depth() {
    let result = ycrcb_from_bgr([0.0; 3], Depth::I16);
    assert!(matches!(
        result,
        Err(Error::UnsupportedDepth {
            depth: Depth::I16,
            ..
        })
    ));
    assert!(bgr_from_ycrcb([0.0; 3], Depth::I32).is_err());
}

// =============================================================================
// HSV
// =============================================================================

#[test]
fn test_hsv_primaries() {
    let src = PixelBuffer::from_fn(4, 1, |x, _| match x {
        0 => Bgr::RED,
        1 => Bgr::GREEN,
        2 => Bgr::BLUE,
        _ => Bgr::gray(77),
    });
    let hsv = bgr_to_hsv(&src);

    assert_eq!(hsv.pixel(0, 0), Bgr::new(0, 255, 255));
    assert_eq!(hsv.pixel(1, 0), Bgr::new(60, 255, 255));
    assert_eq!(hsv.pixel(2, 0), Bgr::new(120, 255, 255));
    assert_eq!(hsv.pixel(3, 0), Bgr::new(0, 0, 77));
}

#[test]
fn test_hsv_magenta_wraps_below_360() {
    // Pure magenta is 300 degrees, stored as 150
    let hsv = bgr_to_hsv(&PixelBuffer::new_filled(1, 1, Bgr::new(255, 0, 255)));
    assert_eq!(hsv.pixel(0, 0), Bgr::new(150, 255, 255));
}

#[test]
fn test_hsv_back_to_bgr_primaries() {
    let src = PixelBuffer::from_fn(3, 1, |x, _| match x {
        0 => Bgr::RED,
        1 => Bgr::GREEN,
        _ => Bgr::WHITE,
    });
    assert_eq!(hsv_to_bgr(&bgr_to_hsv(&src)), src);
}

#[test]
fn test_hsv_float_depth_scale() {
    let [h, s, v] = hsv_from_bgr([0.0, 0.5, 1.0], Depth::F64).unwrap();
    assert!((h - 30.0).abs() < 1e-9);
    assert!((s - 1.0).abs() < 1e-12);
    assert!((v - 1.0).abs() < 1e-12);

    let [b, g, r] = bgr_from_hsv([h, s, v], Depth::F64).unwrap();
    assert!(b.abs() < 1e-9 && (g - 0.5).abs() < 1e-9 && (r - 1.0).abs() < 1e-9);

    assert!(hsv_from_bgr([0.0; 3], Depth::I8).is_err());
}

// =============================================================================
// Channel helpers
// =============================================================================

#[test]
fn test_extract_channel_and_negate() {
    let src = PixelBuffer::new_filled(2, 1, Bgr::new(10, 20, 200));

    let red = extract_channel(&src, Channel::Red);
    assert_eq!(red.pixel(1, 0), Bgr::gray(200));

    let negated = negate(&red);
    assert_eq!(negated.pixel(0, 0), Bgr::gray(55));
}

#[test]
fn test_to_gray_uses_luma() {
    let gray = to_gray(&PixelBuffer::new_filled(1, 1, Bgr::RED));
    // 0.299 * 255 = 76.245
    assert_eq!(gray.pixel(0, 0), Bgr::gray(76));
}
