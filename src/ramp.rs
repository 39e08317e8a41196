//! Built-in character ramps, ordered from sparsest to densest glyph.

use crate::PicasciiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 10 levels, the default.
pub const STANDARD: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// 15 levels.
pub const DETAILED: &[char] = &[
    ' ', '.', ',', ':', ';', 'i', '1', 't', 'f', 'L', 'C', 'G', '0', '8', '@',
];

/// Unicode shade blocks, no blank level.
pub const BLOCKS: &[char] = &['░', '▒', '▓', '█'];

pub const MINIMAL: &[char] = &[' ', '.', '#'];

/// Paul Bourke's 70-level ramp, reversed so that space comes first.
#[rustfmt::skip]
pub const EXTENDED: &[char] = &[
    ' ', '.', '\'', '`', '^', '"', ',', ':', ';', 'I', 'l', '!', 'i', '>', '<', '~',
    '+', '_', '-', '?', ']', '[', '}', '{', '1', ')', '(', '|', '\\', '/', 't', 'f',
    'j', 'r', 'x', 'n', 'u', 'v', 'c', 'z', 'X', 'Y', 'U', 'J', 'C', 'L', 'Q', '0',
    'O', 'Z', 'm', 'w', 'q', 'p', 'd', 'b', 'k', 'h', 'a', 'o', '*', '#', 'M', 'W',
    '&', '8', '%', 'B', '@', '$',
];

/// 11 levels.
pub const COMPACT: &[char] = &[' ', '.', ',', ':', '-', '=', '+', '*', '#', '%', '@'];

/// A named entry of the ramp registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ramp {
    #[default]
    Standard,
    Detailed,
    Blocks,
    Minimal,
    Extended,
    Compact,
}

impl Ramp {
    /// Every ramp, in catalog order.
    pub const ALL: [Ramp; 6] = [
        Ramp::Standard,
        Ramp::Detailed,
        Ramp::Blocks,
        Ramp::Minimal,
        Ramp::Extended,
        Ramp::Compact,
    ];

    pub fn glyphs(&self) -> &'static [char] {
        match self {
            Ramp::Standard => STANDARD,
            Ramp::Detailed => DETAILED,
            Ramp::Blocks => BLOCKS,
            Ramp::Minimal => MINIMAL,
            Ramp::Extended => EXTENDED,
            Ramp::Compact => COMPACT,
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs().len()
    }

    /// Always false: every built-in ramp has at least one glyph.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ramp::Standard => "standard",
            Ramp::Detailed => "detailed",
            Ramp::Blocks => "blocks",
            Ramp::Minimal => "minimal",
            Ramp::Extended => "extended",
            Ramp::Compact => "compact",
        }
    }

    /// Look a ramp up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ramp| ramp.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Cycle to the next ramp in catalog order, wrapping around.
    pub fn next(&self) -> Self {
        let pos = Self::ALL.iter().position(|r| r == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Glyph for a brightness value in [0, 1].
    pub fn glyph_for(&self, brightness: f64) -> (usize, char) {
        let glyphs = self.glyphs();
        let idx = index_for(brightness, glyphs.len());
        (idx, glyphs[idx])
    }
}

impl fmt::Display for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ramp {
    type Err = PicasciiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PicasciiError::UnknownRamp(s.to_string()))
    }
}

/// Ramp index for `brightness`: `floor(brightness * (len - 1))`.
///
/// Out-of-range and NaN inputs are pinned to the ends of the ramp so the
/// result is always a valid index.
pub fn index_for(brightness: f64, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let max = len - 1;
    let scaled = (brightness * max as f64).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        (scaled as usize).min(max)
    }
}
