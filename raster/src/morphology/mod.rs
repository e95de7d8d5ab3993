//! Grayscale morphology per channel over an odd square structuring element.
//! Reads outside the buffer replicate the nearest edge pixel.


use crate::{Bgr, Error, PixelBuffer, Result};

/// Active cells of an odd square mask, stored as offsets from its center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    size: usize,
    offsets: Vec<(i64, i64)>,
}

impl StructuringElement {
    /// `cells` holds `size * size` flags row by row.
    pub fn new(size: usize, cells: &[bool]) -> Result<Self> {
        if size % 2 == 0 {
            return Err(Error::InvalidMask(format!("mask side must be odd, got {}", size)));
        }
        if cells.len() != size * size {
            return Err(Error::InvalidMask(format!(
                "mask must be square: {} cells for side {}",
                cells.len(),
                size
            )));
        }

        let r = (size / 2) as i64;
        let offsets: Vec<(i64, i64)> = cells
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| ((i % size) as i64 - r, (i / size) as i64 - r))
            .collect();

        if offsets.is_empty() {
            return Err(Error::InvalidMask("mask has no active cells".to_string()));
        }

        Ok(Self { size, offsets })
    }

    /// Builds from rows of flags; every row must be as long as there are rows.
    pub fn from_rows(rows: &[&[bool]]) -> Result<Self> {
        if rows.iter().any(|row| row.len() != rows.len()) {
            return Err(Error::InvalidMask(format!(
                "mask with {} rows is not square",
                rows.len()
            )));
        }
        Self::new(rows.len(), &rows.concat())
    }

    /// Every cell active.
    pub fn full(size: usize) -> Result<Self> {
        Self::new(size, &vec![true; size * size])
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn offsets(&self) -> &[(i64, i64)] {
        &self.offsets
    }
}

fn apply(src: &PixelBuffer, element: &StructuringElement, pick: fn(u8, u8) -> u8) -> PixelBuffer {
    let mut out = PixelBuffer::new(src.width(), src.height());
    if src.is_empty() {
        return out;
    }

    for y in 0..src.height() {
        for x in 0..src.width() {
            let mut acc: Option<Bgr> = None;
            for &(dx, dy) in element.offsets() {
                let px = src.pixel_clamped(x as i64 + dx, y as i64 + dy);
                acc = Some(match acc {
                    None => px,
                    Some(a) => Bgr::new(pick(a.b, px.b), pick(a.g, px.g), pick(a.r, px.r)),
                });
            }
            out.set_pixel(x, y, acc.unwrap_or_default());
        }
    }
    out
}

/// Per-channel maximum over the element.
pub fn dilate(src: &PixelBuffer, element: &StructuringElement) -> PixelBuffer {
    apply(src, element, u8::max)
}

/// Per-channel minimum over the element.
pub fn erode(src: &PixelBuffer, element: &StructuringElement) -> PixelBuffer {
    apply(src, element, u8::min)
}

/// Erosion then dilation. Removes specks smaller than the element.
pub fn open(src: &PixelBuffer, element: &StructuringElement) -> PixelBuffer {
    dilate(&erode(src, element), element)
}

/// Dilation then erosion. Fills gaps smaller than the element.
pub fn close(src: &PixelBuffer, element: &StructuringElement) -> PixelBuffer {
    erode(&dilate(src, element), element)
}
