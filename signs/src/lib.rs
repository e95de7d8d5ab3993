//! Traffic-sign detection built on connected-component geometry.
//!
//! The pipeline isolates red regions, tells circular signs from triangular
//! ones by how well each region fills the circle spanned by its diameter,
//! and reads speed-limit digits by template comparison.

mod config;
mod detector;
mod error;
mod sign;
mod templates;

pub mod component;
pub mod labeling;

#[cfg(test)]
pub(crate) mod testing;

pub use component::ConnectedComponent;
pub use config::DetectorConfig;
pub use detector::{DetectionResult, Diagnostics, SignDetector};
pub use error::{Error, Result};
pub use labeling::{label, label_with_mask, Connectivity, Labeling, NeighborMask, UnionFind};
pub use sign::{Digit, Sign, SignKind};
pub use templates::DigitTemplates;
