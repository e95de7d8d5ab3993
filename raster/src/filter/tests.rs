use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::border::{visit_regions, Region};
use super::kernel::{convolve_direct, convolve_separable};
use super::*;
use crate::{Bgr, Error};

fn random_buffer(width: u32, height: u32, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    PixelBuffer::from_fn(width, height, |_, _| {
        Bgr::new(rng.random(), rng.random(), rng.random())
    })
}

fn vertical_step(width: u32, height: u32, split: u32, value: u8) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, _| {
        if x >= split {
            Bgr::gray(value)
        } else {
            Bgr::BLACK
        }
    })
}

// =============================================================================
// Regions
// =============================================================================

#[test]
fn test_visit_regions_covers_every_pixel_once() {
    for &(w, h, rx, ry) in &[(10, 8, 1, 1), (10, 8, 2, 3), (3, 2, 5, 5), (1, 1, 0, 0), (7, 1, 2, 1)] {
        let mut hits = vec![0u32; w * h];
        let mut interior_ok = true;
        visit_regions(w, h, rx, ry, |x, y, region| {
            hits[y * w + x] += 1;
            if region == Region::Interior {
                interior_ok &= x >= rx && x + rx < w && y >= ry && y + ry < h;
            }
        });
        assert!(hits.iter().all(|&n| n == 1), "{}x{} r=({}, {})", w, h, rx, ry);
        assert!(interior_ok, "interior window leaves {}x{}", w, h);
    }
}

// =============================================================================
// Mean filters
// =============================================================================

#[test]
fn test_mean_filters_identical() {
    for (seed, &(w, h)) in [(17u32, 13u32), (9, 9), (3, 2), (1, 5)].iter().enumerate() {
        let src = random_buffer(w, h, seed as u64);
        for dim in [1, 3, 5, 7] {
            let quadratic = mean_quadratic(&src, dim).unwrap();
            let linear = mean_linear(&src, dim).unwrap();
            let constant = mean_constant(&src, dim).unwrap();

            assert_eq!(quadratic, linear, "linear differs for {}x{} dim {}", w, h, dim);
            assert_eq!(quadratic, constant, "constant differs for {}x{} dim {}", w, h, dim);
        }
    }
}

#[test]
fn test_mean_single_bright_pixel() {
    let src = PixelBuffer::from_fn(3, 3, |x, y| {
        if x == 1 && y == 1 {
            Bgr::WHITE
        } else {
            Bgr::BLACK
        }
    });
    let out = mean_quadratic(&src, 3).unwrap();
    // (255 + 4) / 9 = 28
    assert_eq!(out.pixel(1, 1), Bgr::gray(28));
}

#[test]
fn test_mean_dim_one_is_identity() {
    let src = random_buffer(6, 4, 3);
    assert_eq!(mean_constant(&src, 1).unwrap(), src);
}

#[test]
fn test_mean_rejects_even_dim() {
    let src = PixelBuffer::new(4, 4);
    assert!(matches!(mean_quadratic(&src, 4), Err(Error::InvalidArgument(_))));
    assert!(mean_linear(&src, 0).is_err());
    assert!(mean_constant(&src, 2).is_err());
}

#[test]
fn test_in_place_replaces_buffer() {
    let mut buffer = PixelBuffer::new_filled(5, 5, Bgr::gray(40));
    buffer.set_pixel(2, 2, Bgr::gray(255));
    in_place(&mut buffer, |b| median_blur_3d(b, 3)).unwrap();
    assert_eq!(buffer.pixel(2, 2), Bgr::gray(40));
}

// =============================================================================
// General convolution
// =============================================================================

#[test]
fn test_separable_detection() {
    let binomial = Kernel::from_rows(&[&[1.0, 2.0, 1.0], &[2.0, 4.0, 2.0], &[1.0, 2.0, 1.0]]).unwrap();
    let (u, v) = binomial.separable_factors().unwrap();
    assert_eq!(u, vec![1.0, 2.0, 1.0]);
    assert_eq!(v, vec![1.0, 2.0, 1.0]);

    let row_only = Kernel::from_rows(&[&[0.0, 0.0, 0.0], &[1.0, 2.0, 1.0], &[0.0, 0.0, 0.0]]).unwrap();
    assert!(row_only.separable_factors().is_some());

    let laplacian = Kernel::from_rows(&[&[0.0, 1.0, 0.0], &[1.0, -4.0, 1.0], &[0.0, 1.0, 0.0]]).unwrap();
    assert!(laplacian.separable_factors().is_none());
}

#[test]
fn test_separable_matches_direct() {
    let src = random_buffer(19, 11, 42);
    let kernel = Kernel::from_rows(&[
        &[1.0, 2.0, 1.0],
        &[2.0, 4.0, 2.0],
        &[1.0, 2.0, 1.0],
    ])
    .unwrap();
    let (u, v) = kernel.separable_factors().unwrap();

    let separable = convolve_separable(&src, &u, &v, 16.0, 0.0);
    let direct = convolve_direct(&src, &kernel, 16.0, 0.0);
    assert_eq!(separable, direct);
    assert_eq!(non_uniform(&src, &kernel, 16.0, 0.0).unwrap(), direct);
}

#[test]
fn test_non_uniform_rectangular_kernel() {
    // 5 columns, 1 row: horizontal box of width 5
    let src = random_buffer(12, 7, 5);
    let kernel = Kernel::new(5, 1, vec![1.0; 5]).unwrap();
    let out = non_uniform(&src, &kernel, 5.0, 0.0).unwrap();

    let px = src.pixel(5, 3);
    let expected: f64 = (3..8).map(|x| src.pixel(x, 3).b as f64).sum::<f64>() / 5.0;
    assert_eq!(out.pixel(5, 3).b, expected.round() as u8, "source pixel {:?}", px);
}

#[test]
fn test_non_uniform_offset_on_flat_image() {
    let src = PixelBuffer::new_filled(6, 6, Bgr::gray(90));
    let laplacian = Kernel::from_rows(&[&[0.0, 1.0, 0.0], &[1.0, -4.0, 1.0], &[0.0, 1.0, 0.0]]).unwrap();
    let out = non_uniform(&src, &laplacian, 1.0, 128.0).unwrap();
    assert!(out.pixels().all(|(_, px)| px == Bgr::gray(128)));
}

#[test]
fn test_non_uniform_validation() {
    let src = PixelBuffer::new(3, 3);
    let kernel = Kernel::new(1, 1, vec![1.0]).unwrap();
    assert!(matches!(
        non_uniform(&src, &kernel, 0.0, 0.0),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(Kernel::new(2, 3, vec![0.0; 6]), Err(Error::InvalidKernel(_))));
    assert!(matches!(Kernel::new(3, 3, vec![0.0; 8]), Err(Error::InvalidKernel(_))));
}

// =============================================================================
// Edge operators
// =============================================================================

#[test]
fn test_sobel_step_edge() {
    let src = vertical_step(4, 3, 2, 100);
    let out = sobel(&src).unwrap();

    assert_eq!(out.pixel(0, 1), Bgr::BLACK);
    // gx = 4 * 100, clamped
    assert_eq!(out.pixel(1, 1), Bgr::WHITE);
    assert_eq!(out.pixel(2, 1), Bgr::WHITE);
    assert_eq!(out.pixel(3, 1), Bgr::BLACK);
}

#[test]
fn test_sobel_flat_is_zero() {
    let out = sobel(&PixelBuffer::new_filled(5, 4, Bgr::gray(200))).unwrap();
    assert!(out.pixels().all(|(_, px)| px == Bgr::BLACK));
}

#[test]
fn test_differentiation_step_edge() {
    let out = differentiation(&vertical_step(4, 2, 2, 100)).unwrap();
    assert_eq!(out.pixel(0, 0), Bgr::BLACK);
    assert_eq!(out.pixel(1, 0), Bgr::gray(100));
    assert_eq!(out.pixel(3, 1), Bgr::BLACK);
}

#[test]
fn test_roberts_edges_use_doubled_difference() {
    let values = [[10u8, 20], [30, 40]];
    let src = PixelBuffer::from_fn(2, 2, |x, y| Bgr::gray(values[y as usize][x as usize]));
    let out = roberts(&src).unwrap();

    assert_eq!(out.pixel(0, 0), Bgr::gray(40)); // |10-40| + |20-30|
    assert_eq!(out.pixel(1, 0), Bgr::gray(40)); // 2 * |20-40|
    assert_eq!(out.pixel(0, 1), Bgr::gray(20)); // 2 * |30-40|
    assert_eq!(out.pixel(1, 1), Bgr::BLACK);
}

// =============================================================================
// Medoid
// =============================================================================

#[test]
fn test_median_blur_removes_outlier() {
    let mut src = PixelBuffer::new_filled(5, 5, Bgr::new(50, 60, 70));
    src.set_pixel(2, 2, Bgr::new(255, 0, 255));
    let out = median_blur_3d(&src, 3).unwrap();
    assert!(out.pixels().all(|(_, px)| px == Bgr::new(50, 60, 70)));
}

#[test]
fn test_median_blur_output_is_window_member() {
    let src = random_buffer(6, 5, 11);
    let out = median_blur_3d(&src, 3).unwrap();
    for (p, px) in out.pixels() {
        let found = (-1..=1).any(|dy| {
            (-1..=1).any(|dx| src.pixel_clamped(p.x as i64 + dx, p.y as i64 + dy) == px)
        });
        assert!(found, "output at {:?} not taken from its window", p);
    }
}

#[test]
fn test_median_blur_rejects_even_dim() {
    assert!(median_blur_3d(&PixelBuffer::new(3, 3), 2).is_err());
}
