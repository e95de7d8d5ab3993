use serde::{Deserialize, Serialize};

/// One 8-bit pixel in blue, green, red channel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    /// Gray pixel with all three channels set to `value`.
    pub const fn gray(value: u8) -> Self {
        Self {
            b: value,
            g: value,
            r: value,
        }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    /// Rec. 601 luma, rounded to the nearest level.
    pub fn luma(self) -> u8 {
        let y = 0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64;
        y.round().clamp(0.0, 255.0) as u8
    }

    /// Foreground test for binary buffers: every channel saturated.
    pub fn is_white(self) -> bool {
        self == Self::WHITE
    }

    pub const BLACK: Bgr = Bgr::gray(0);
    pub const WHITE: Bgr = Bgr::gray(255);
    pub const RED: Bgr = Bgr::new(0, 0, 255);
    pub const GREEN: Bgr = Bgr::new(0, 255, 0);
    pub const BLUE: Bgr = Bgr::new(255, 0, 0);
}

impl From<[u8; 3]> for Bgr {
    fn from(arr: [u8; 3]) -> Self {
        Self {
            b: arr[0],
            g: arr[1],
            r: arr[2],
        }
    }
}

impl From<Bgr> for [u8; 3] {
    fn from(pixel: Bgr) -> Self {
        pixel.to_array()
    }
}
