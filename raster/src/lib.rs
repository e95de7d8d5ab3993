//! Strided BGR pixel buffers and the engines that operate on them.
//!
//! Every engine borrows a [`PixelBuffer`] and returns a freshly allocated
//! result of the same dimensions unless stated otherwise. Preconditions are
//! validated before any pixel is written.

mod buffer;
mod depth;
mod error;
mod geometry;
mod pixel;

pub mod color;
pub mod compare;
pub mod filter;
pub mod morphology;
pub mod threshold;
pub mod transform;

pub use buffer::{BufferDesc, PixelBuffer, CHANNELS};
pub use depth::Depth;
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use pixel::Bgr;
