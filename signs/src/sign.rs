use std::fmt;

use raster::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignKind {
    #[default]
    Unknown,
    /// Triangular warning sign.
    Danger,
    /// Circular sign carrying a recognized number.
    SpeedLimit,
    /// Circular sign without a readable number.
    Prohibition,
}

impl fmt::Display for SignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignKind::Unknown => "unknown",
            SignKind::Danger => "danger",
            SignKind::SpeedLimit => "speed-limit",
            SignKind::Prohibition => "prohibition",
        };
        f.write_str(name)
    }
}

/// A recognized digit and where it was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Digit {
    pub value: char,
    pub bounds: Rect,
    /// Fraction of pixels that matched the winning template.
    pub score: f64,
}

/// A detected sign.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sign {
    pub kind: SignKind,
    pub bounds: Rect,
    /// Left empty unless `kind` is [`SignKind::SpeedLimit`].
    pub digits: Vec<Digit>,
}

impl Sign {
    /// The digits read as a number, for speed-limit signs.
    pub fn speed(&self) -> Option<u32> {
        if self.kind != SignKind::SpeedLimit {
            return None;
        }
        self.digits
            .iter()
            .map(|d| d.value)
            .collect::<String>()
            .parse()
            .ok()
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.bounds)?;
        if let Some(speed) = self.speed() {
            write!(f, " limit {}", speed)?;
        }
        Ok(())
    }
}
