/// Which part of the image a pixel belongs to for a window of radius `(rx, ry)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Region {
    /// The window may leave the image; reads must be clamped.
    Border,
    /// The whole window is inside the image.
    Interior,
}

/// Visits every pixel exactly once: top band, bottom band, left and right
/// bands of the remaining rows, then the interior core in raster order.
pub(crate) fn visit_regions(
    width: usize,
    height: usize,
    rx: usize,
    ry: usize,
    mut visit: impl FnMut(usize, usize, Region),
) {
    let top_end = ry.min(height);
    let bottom_start = height.saturating_sub(ry).max(top_end);
    let left_end = rx.min(width);
    let right_start = width.saturating_sub(rx).max(left_end);

    for y in (0..top_end).chain(bottom_start..height) {
        for x in 0..width {
            visit(x, y, Region::Border);
        }
    }

    for y in top_end..bottom_start {
        for x in (0..left_end).chain(right_start..width) {
            visit(x, y, Region::Border);
        }
    }

    for y in top_end..bottom_start {
        for x in left_end..right_start {
            visit(x, y, Region::Interior);
        }
    }
}
