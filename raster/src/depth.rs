use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Channel depth, used by the scalar conversions whose constants depend on
/// the numeric range of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Depth {
    #[default]
    U8,
    I8,
    U16,
    I16,
    I32,
    F32,
    F64,
}

impl Depth {
    /// Chroma offset added to Cr and Cb: half of the unsigned range, or 0.5
    /// for floating point channels.
    pub fn chroma_offset(self) -> Result<f64> {
        match self {
            Depth::U8 => Ok(128.0),
            Depth::U16 => Ok(32768.0),
            Depth::F32 | Depth::F64 => Ok(0.5),
            _ => Err(Error::UnsupportedDepth {
                depth: self,
                operation: "chroma offset",
            }),
        }
    }

    /// Largest channel value: 255, 65535 or 1.0.
    pub fn full_scale(self) -> Result<f64> {
        match self {
            Depth::U8 => Ok(255.0),
            Depth::U16 => Ok(65535.0),
            Depth::F32 | Depth::F64 => Ok(1.0),
            _ => Err(Error::UnsupportedDepth {
                depth: self,
                operation: "full scale",
            }),
        }
    }
}
