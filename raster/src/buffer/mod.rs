mod stride;


use std::fmt;

use crate::{Bgr, Error, Point, Rect, Result};

use stride::{add_stride_padding, align_stride, strip_stride_padding};

/// Channels per pixel. Buffers always hold 8-bit BGR.
pub const CHANNELS: usize = 3;

/// Geometry of a strided buffer. Rows start `stride` bytes apart; the bytes
/// between `row_bytes()` and `stride` are padding and carry no pixel data.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct BufferDesc {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
}

impl BufferDesc {
    /// Descriptor with rows padded to a 4-byte boundary.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stride: align_stride(width as usize * CHANNELS),
        }
    }

    pub fn new_packed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stride: width as usize * CHANNELS,
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        self.height as usize * self.stride
    }

    /// Returns the number of bytes per row without padding.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * CHANNELS
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns true if stride equals row bytes (no padding).
    pub fn is_packed(&self) -> bool {
        self.stride == self.row_bytes()
    }

    pub fn validate(&self) -> Result<()> {
        if self.stride < self.row_bytes() {
            return Err(Error::InvalidGeometry(format!(
                "stride {} is smaller than row length {}",
                self.stride,
                self.row_bytes()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for BufferDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} (stride {})", self.width, self.height, self.stride)
    }
}

/// Owned row-major BGR image. Engines borrow it; all pixel addressing goes
/// through the stride, never through `width * CHANNELS`.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    desc: BufferDesc,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Black buffer with a 4-byte aligned stride.
    pub fn new(width: u32, height: u32) -> Self {
        let desc = BufferDesc::new(width, height);
        Self {
            desc,
            bytes: vec![0; desc.size_in_bytes()],
        }
    }

    pub fn new_filled(width: u32, height: u32, color: Bgr) -> Self {
        let mut buffer = Self::new(width, height);
        if color != Bgr::BLACK {
            buffer.fill(color);
        }
        buffer
    }

    /// Builds a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Bgr) -> Self {
        let mut buffer = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buffer.set_pixel(x, y, f(x, y));
            }
        }
        buffer
    }

    /// Wraps existing strided bytes. The byte count must match the descriptor exactly.
    pub fn from_raw(desc: BufferDesc, bytes: Vec<u8>) -> Result<Self> {
        desc.validate()?;

        if bytes.len() != desc.size_in_bytes() {
            return Err(Error::InvalidGeometry(format!(
                "bytes length {} does not match expected size {}",
                bytes.len(),
                desc.size_in_bytes()
            )));
        }

        Ok(Self { desc, bytes })
    }

    /// Copies tightly packed BGR bytes into an aligned buffer.
    pub fn from_bgr(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let packed = BufferDesc::new_packed(width, height);
        if bytes.len() != packed.size_in_bytes() {
            return Err(Error::InvalidGeometry(format!(
                "expected {} packed BGR bytes for {}x{}, got {}",
                packed.size_in_bytes(),
                width,
                height,
                bytes.len()
            )));
        }

        let desc = BufferDesc::new(width, height);
        let bytes = add_stride_padding(bytes, desc.row_bytes(), height as usize, desc.stride);
        Ok(Self { desc, bytes })
    }

    /// Copies tightly packed RGB bytes (decoder order), swapping to BGR.
    pub fn from_rgb(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut bgr = bytes.to_vec();
        for px in bgr.chunks_exact_mut(CHANNELS) {
            px.swap(0, 2);
        }
        Self::from_bgr(width, height, &bgr)
    }

    /// Returns the buffer descriptor.
    pub fn desc(&self) -> &BufferDesc {
        &self.desc
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn stride(&self) -> usize {
        self.desc.stride
    }

    pub fn is_empty(&self) -> bool {
        self.desc.pixel_count() == 0
    }

    /// Raw strided bytes, padding included.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.desc.stride + x as usize * CHANNELS
    }

    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Bgr {
        debug_assert!(x < self.desc.width && y < self.desc.height);
        let i = self.offset(x, y);
        Bgr::new(self.bytes[i], self.bytes[i + 1], self.bytes[i + 2])
    }

    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Bgr) {
        debug_assert!(x < self.desc.width && y < self.desc.height);
        let i = self.offset(x, y);
        self.bytes[i] = color.b;
        self.bytes[i + 1] = color.g;
        self.bytes[i + 2] = color.r;
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.desc.width as i64 && y < self.desc.height as i64
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Bgr> {
        self.contains(x, y).then(|| self.pixel(x as u32, y as u32))
    }

    /// Reads with replicated borders: coordinates outside the buffer snap
    /// to the nearest edge pixel. The buffer must not be empty.
    #[inline]
    pub fn pixel_clamped(&self, x: i64, y: i64) -> Bgr {
        let x = x.clamp(0, self.desc.width as i64 - 1) as u32;
        let y = y.clamp(0, self.desc.height as i64 - 1) as u32;
        self.pixel(x, y)
    }

    /// Pixel bytes of row `y`, padding excluded.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.desc.stride;
        &self.bytes[start..start + self.desc.row_bytes()]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.desc.stride;
        let row_bytes = self.desc.row_bytes();
        &mut self.bytes[start..start + row_bytes]
    }

    pub fn fill(&mut self, color: Bgr) {
        let color = color.to_array();
        for y in 0..self.desc.height {
            for px in self.row_mut(y).chunks_exact_mut(CHANNELS) {
                px.copy_from_slice(&color);
            }
        }
    }

    /// Applies `f` to every pixel in place.
    pub fn map_in_place(&mut self, mut f: impl FnMut(Bgr) -> Bgr) {
        for y in 0..self.desc.height {
            for px in self.row_mut(y).chunks_exact_mut(CHANNELS) {
                let out = f(Bgr::new(px[0], px[1], px[2]));
                px.copy_from_slice(&out.to_array());
            }
        }
    }

    /// New buffer with `f` applied to every pixel.
    pub fn map(&self, f: impl FnMut(Bgr) -> Bgr) -> Self {
        let mut out = self.clone();
        out.map_in_place(f);
        out
    }

    /// Iterates pixels in raster order with their coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (Point, Bgr)> + '_ {
        (0..self.desc.height).flat_map(move |y| {
            self.row(y)
                .chunks_exact(CHANNELS)
                .enumerate()
                .map(move |(x, px)| (Point::new(x as i32, y as i32), Bgr::new(px[0], px[1], px[2])))
        })
    }

    /// Copies the region `rect`, which must lie inside the buffer.
    pub fn crop(&self, rect: Rect) -> Result<Self> {
        if rect.right() > self.desc.width || rect.bottom() > self.desc.height {
            return Err(Error::InvalidArgument(format!(
                "crop {} exceeds buffer {}x{}",
                rect, self.desc.width, self.desc.height
            )));
        }

        let mut out = Self::new(rect.width, rect.height);
        let start = rect.x as usize * CHANNELS;
        let len = out.desc.row_bytes();
        for y in 0..rect.height {
            out.row_mut(y)
                .copy_from_slice(&self.row(rect.y + y)[start..start + len]);
        }
        Ok(out)
    }

    /// Pixel bytes without row padding.
    pub fn packed_bytes(&self) -> Vec<u8> {
        strip_stride_padding(
            &self.bytes,
            self.desc.row_bytes(),
            self.desc.height as usize,
            self.desc.stride,
        )
    }

    /// Packed bytes in RGB order, as encoders expect.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = self.packed_bytes();
        for px in bytes.chunks_exact_mut(CHANNELS) {
            px.swap(0, 2);
        }
        bytes
    }

    pub fn same_size(&self, other: &PixelBuffer) -> bool {
        self.desc.width == other.desc.width && self.desc.height == other.desc.height
    }

    pub fn ensure_same_size(&self, other: &PixelBuffer) -> Result<()> {
        if self.same_size(other) {
            return Ok(());
        }
        Err(Error::DimensionMismatch {
            left_width: self.desc.width,
            left_height: self.desc.height,
            right_width: other.desc.width,
            right_height: other.desc.height,
        })
    }
}

/// Equality ignores row padding.
impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.same_size(other) && (0..self.desc.height).all(|y| self.row(y) == other.row(y))
    }
}

impl Eq for PixelBuffer {}
