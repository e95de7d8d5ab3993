use thiserror::Error;

use crate::Depth;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid buffer geometry: {0}")]
    InvalidGeometry(String),

    #[error("Dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Depth {depth:?} is not supported by {operation}")]
    UnsupportedDepth {
        depth: Depth,
        operation: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
