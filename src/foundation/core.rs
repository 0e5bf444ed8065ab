use std::{fmt, str::FromStr};

use crate::foundation::error::{StageQcError, StageQcResult};

pub use kurbo::{Point, Rect, Size};

/// Integer pixel dimensions of an asset or stage.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Build dimensions from a width/height pair.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height` as a float.
    ///
    /// A zero height yields a non-finite ratio (infinite, or NaN for `0x0`).
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// True when both sides are non-zero.
    pub fn is_positive(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Same dimensions as a float [`Size`].
    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = StageQcError;

    /// Parse `WIDTHxHEIGHT` (`x` or `X`, surrounding whitespace ignored).
    fn from_str(s: &str) -> StageQcResult<Self> {
        let s = s.trim();
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| StageQcError::validation(format!("expected WIDTHxHEIGHT, got '{s}'")))?;
        let parse = |part: &str, name: &str| {
            part.trim().parse::<u32>().map_err(|e| {
                StageQcError::validation(format!("invalid {name} '{}': {e}", part.trim()))
            })
        };
        Ok(Self::new(parse(w, "width")?, parse(h, "height")?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
