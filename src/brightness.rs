//! Per-sample brightness in [0, 1].
//!
//! Grayscale mode uses linear BT.601 luma. Color mode uses the perceived
//! brightness magnitude `sqrt(0.299 R² + 0.587 G² + 0.114 B²)` on normalized
//! channels, which is a different curve and is kept exactly as is.

/// Linear BT.601 luma.
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    (0.299 * r + 0.587 * g + 0.114 * b) / 255.0
}

/// Perceived brightness magnitude.
pub fn perceived(r: u8, g: u8, b: u8) -> f64 {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    (0.299 * r * r + 0.587 * g * g + 0.114 * b * b).sqrt()
}

/// Brightness for one pixel under the given mode flags.
pub fn brightness(rgb: [u8; 3], grayscale: bool, inverted: bool) -> f64 {
    let [r, g, b] = rgb;
    let value = if grayscale { luma(r, g, b) } else { perceived(r, g, b) };
    if inverted {
        1.0 - value
    } else {
        value
    }
}
