//! Glyph colors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest value any channel of a colored glyph may take, so that glyphs
/// drawn from near-black pixels stay visible on a dark background.
pub const COLOR_FLOOR: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Color of every glyph in grayscale mode.
pub const NEUTRAL: Rgb = Rgb::new(255, 255, 255);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Scale factor in [0.5, 2.0] for the glyph at `index` of a ramp of `len`.
pub fn brightness_factor(index: usize, len: usize) -> f64 {
    let position = if len > 1 { index as f64 / (len - 1) as f64 } else { 0.0 };
    position * 1.5 + 0.5
}

/// Color of a glyph sampled from `rgb` and drawn with ramp entry `index`.
pub fn glyph_color(rgb: [u8; 3], index: usize, len: usize) -> Rgb {
    let factor = brightness_factor(index, len);
    let scale = |c: u8| (c as f64 * factor).round().clamp(COLOR_FLOOR as f64, 255.0) as u8;
    Rgb::new(scale(rgb[0]), scale(rgb[1]), scale(rgb[2]))
}
