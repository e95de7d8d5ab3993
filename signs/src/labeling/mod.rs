//! Two-pass connected component labeling over binary buffers.
//!
//! Foreground is white. Pass one hands every foreground pixel a fresh label,
//! a propagation pass merges each pixel with its already visited neighbors
//! through a union-find forest, and pass two resolves every label to its
//! root and gathers pixels per root.

mod union_find;


use hashbrown::HashMap;
use raster::{Bgr, PixelBuffer, Point};
use serde::{Deserialize, Serialize};

pub use union_find::UnionFind;

use crate::component::ConnectedComponent;
use crate::{Error, Result};

/// Pixel connectivity for connected component labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Connectivity {
    /// Horizontal and vertical neighbors only.
    #[default]
    Four,
    /// Diagonal neighbors as well.
    Eight,
}

impl Connectivity {
    pub fn mask(self) -> NeighborMask {
        let cells: &[bool] = match self {
            Connectivity::Four => &[false, true, false, true, true, true, false, true, false],
            Connectivity::Eight => &[true; 9],
        };
        // Both grids are 3x3 with the center set
        NeighborMask::from_cells(3, cells)
    }
}

/// Neighborhood of a pixel as offsets from the center of an odd square grid.
/// Only the offsets preceding the center in raster order take part in
/// labeling, since those neighbors have already been visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborMask {
    size: usize,
    previous: Vec<(i64, i64)>,
}

impl NeighborMask {
    /// `cells` holds `size * size` flags row by row.
    pub fn new(size: usize, cells: &[bool]) -> Result<Self> {
        if size % 2 == 0 || cells.len() != size * size {
            return Err(Error::InvalidMask(format!(
                "neighborhood must be an odd square grid, got {} cells for side {}",
                cells.len(),
                size
            )));
        }
        Ok(Self::from_cells(size, cells))
    }

    fn from_cells(size: usize, cells: &[bool]) -> Self {
        let r = (size / 2) as i64;
        let previous = cells
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| ((i % size) as i64 - r, (i / size) as i64 - r))
            .filter(|&(dx, dy)| dy < 0 || (dy == 0 && dx < 0))
            .collect();
        Self { size, previous }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Offsets visited before the center in raster order.
    pub fn previous(&self) -> &[(i64, i64)] {
        &self.previous
    }
}

/// Result of labeling one buffer.
#[derive(Debug)]
pub struct Labeling {
    width: u32,
    height: u32,
    /// Root label per pixel, 0 for background.
    labels: Vec<u32>,
    /// One per root, ordered by first appearance in raster order.
    components: Vec<ConnectedComponent>,
}

impl Labeling {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn label_at(&self, x: u32, y: u32) -> u32 {
        self.labels[y as usize * self.width as usize + x as usize]
    }

    pub fn components(&self) -> &[ConnectedComponent] {
        &self.components
    }

    pub fn into_components(self) -> Vec<ConnectedComponent> {
        self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Paints each component with its own color on black. Colors are spread
    /// evenly around the hue circle in component order.
    pub fn render_colored(&self) -> PixelBuffer {
        let palette = hue_palette(self.components.len());
        let mut out = PixelBuffer::new(self.width, self.height);
        for (component, &color) in self.components.iter().zip(&palette) {
            for p in component.pixels() {
                out.set_pixel(p.x as u32, p.y as u32, color);
            }
        }
        out
    }
}

/// `count` fully saturated colors with hues `i * 180 / count` in 8-bit HSV units.
fn hue_palette(count: usize) -> Vec<Bgr> {
    if count == 0 {
        return Vec::new();
    }
    let hsv = PixelBuffer::from_fn(count as u32, 1, |i, _| {
        Bgr::new((i as usize * 180 / count) as u8, 255, 255)
    });
    let bgr = raster::color::hsv_to_bgr(&hsv);
    (0..count as u32).map(|i| bgr.pixel(i, 0)).collect()
}

/// Labels white regions of `binary` under `connectivity`.
pub fn label(binary: &PixelBuffer, connectivity: Connectivity) -> Labeling {
    label_with_mask(binary, &connectivity.mask())
}

/// Labels white regions of `binary` under an arbitrary neighborhood.
pub fn label_with_mask(binary: &PixelBuffer, mask: &NeighborMask) -> Labeling {
    let (w, h) = (binary.width() as usize, binary.height() as usize);
    let mut labels = vec![0u32; w * h];

    // Pass 1: fresh label per foreground pixel
    let mut next = 1u32;
    for (p, px) in binary.pixels() {
        if px.is_white() {
            labels[p.y as usize * w + p.x as usize] = next;
            next += 1;
        }
    }

    // Propagation: adopt the smallest visited neighbor label, merge the rest
    let mut forest = UnionFind::with_capacity(next as usize);
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            if labels[i] == 0 {
                continue;
            }

            let mut smallest = 0u32;
            for &(dx, dy) in mask.previous() {
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                    continue;
                }
                let neighbor = labels[ny as usize * w + nx as usize];
                if neighbor != 0 && (smallest == 0 || neighbor < smallest) {
                    smallest = neighbor;
                }
            }
            if smallest == 0 {
                continue;
            }

            labels[i] = smallest;
            for &(dx, dy) in mask.previous() {
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                    continue;
                }
                let neighbor = labels[ny as usize * w + nx as usize];
                if neighbor != 0 {
                    forest.union(smallest, neighbor);
                }
            }
        }
    }

    // Pass 2: resolve roots and gather pixels
    let mut index_of_root: HashMap<u32, usize> = HashMap::new();
    let mut groups: Vec<(u32, Vec<Point>)> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            if labels[i] == 0 {
                continue;
            }
            let root = forest.find(labels[i]);
            labels[i] = root;

            let index = *index_of_root.entry(root).or_insert_with(|| {
                groups.push((root, Vec::new()));
                groups.len() - 1
            });
            groups[index].1.push(Point::new(x as i32, y as i32));
        }
    }

    tracing::trace!(
        "Labeled {} components from {} provisional labels",
        groups.len(),
        next - 1
    );

    Labeling {
        width: binary.width(),
        height: binary.height(),
        labels,
        components: groups
            .into_iter()
            .map(|(root, pixels)| ConnectedComponent::new(root, pixels))
            .collect(),
    }
}

/// Keeps components with at least `min_area` pixels.
pub fn filter_min_area(components: Vec<ConnectedComponent>, min_area: usize) -> Vec<ConnectedComponent> {
    components
        .into_iter()
        .filter(|c| c.area() >= min_area)
        .collect()
}
