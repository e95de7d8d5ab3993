//! Neighborhood filters over BGR buffers.
//!
//! Every filter keeps the input dimensions and treats pixels outside the
//! buffer as copies of the nearest edge pixel. Window sizes must be odd.

mod border;
mod edge;
mod kernel;
mod mean;
mod medoid;

#[cfg(test)]
mod tests;

pub use edge::{differentiation, roberts, sobel};
pub use kernel::{non_uniform, Kernel};
pub use mean::{mean_constant, mean_linear, mean_quadratic};
pub use medoid::median_blur_3d;

use crate::{Error, PixelBuffer, Result};

fn validate_dim(dim: usize) -> Result<()> {
    if dim == 0 || dim % 2 == 0 {
        return Err(Error::InvalidArgument(format!(
            "window size must be odd and positive, got {}",
            dim
        )));
    }
    Ok(())
}

/// Runs `filter` and replaces `buffer` with its output.
pub fn in_place(
    buffer: &mut PixelBuffer,
    filter: impl FnOnce(&PixelBuffer) -> Result<PixelBuffer>,
) -> Result<()> {
    *buffer = filter(buffer)?;
    Ok(())
}

#[inline]
fn round_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Integer mean with round-half-up.
#[inline]
fn mean_channel(sum: i64, count: i64) -> u8 {
    ((sum + count / 2) / count).clamp(0, 255) as u8
}
