//! Shared value types used across the pipeline stages.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid dimension value: {0:?}")]
pub struct DimensionError(pub String);

/// A bounding box in pixels, written `WxH` on the command line.
///
/// Both sides are strictly positive. Resizing fits an image inside the box
/// while keeping its aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl Dimension {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    /// Parse `"480x640"` into width 480, height 640.
    ///
    /// Only the first `x` splits; anything that is not two positive integers
    /// is rejected.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DimensionError(value.to_string());
        let (w, h) = value.split_once('x').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
