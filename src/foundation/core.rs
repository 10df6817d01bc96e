use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{LoopfxError, LoopfxResult};

/// Absolute 0-based frame index within one loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(pub u64);

/// Output dimensions in pixels, written as `WIDTHxHEIGHT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a resolution.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Landscape and portrait HD / Full HD, the sizes exported when none are requested.
    pub fn default_export_set() -> Vec<Self> {
        vec![
            Self::new(1280, 720),
            Self::new(720, 1280),
            Self::new(1920, 1080),
            Self::new(1080, 1920),
        ]
    }

    /// Byte length of one tightly packed 4-channel frame at this size.
    pub fn frame_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = LoopfxError;

    fn from_str(s: &str) -> LoopfxResult<Self> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| LoopfxError::validation(format!("resolution '{s}' is not WxH")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| LoopfxError::validation(format!("resolution '{s}': {e}")))
        };
        let res = Self::new(parse(w)?, parse(h)?);
        if res.width == 0 || res.height == 0 {
            return Err(LoopfxError::validation(format!(
                "resolution '{s}' must be non-zero"
            )));
        }
        Ok(res)
    }
}

impl TryFrom<String> for Resolution {
    type Error = LoopfxError;

    fn try_from(value: String) -> LoopfxResult<Self> {
        value.parse()
    }
}

impl From<Resolution> for String {
    fn from(value: Resolution) -> Self {
        value.to_string()
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Neutral gray `v` at alpha `a`.
    pub const fn gray(v: u8, a: u8) -> Self {
        Self::new(v, v, v, a)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
