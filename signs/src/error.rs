use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Raster(#[from] raster::Error),

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Invalid detector configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid digit template '{digit}': {reason}")]
    InvalidTemplate { digit: char, reason: String },

    #[error("Failed to load template '{path}': {source}")]
    TemplateImage {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("No digit templates found in '{path}'")]
    NoTemplates { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
