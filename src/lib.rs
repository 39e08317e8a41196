//! Image to ASCII art converter.
//!
//! Samples a decoded image on a stride grid, maps each sample's brightness to
//! a glyph from a character ramp and, in color mode, derives the glyph color
//! from the source pixel.

pub mod brightness;
pub mod buffer;
#[cfg(not(target_arch = "wasm32"))]
pub mod canvas;
pub mod color;
pub mod grid;
pub mod ramp;
pub mod sampling;
pub mod session;
pub mod settings;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use buffer::{PixelBuffer, PixelSource};
pub use color::Rgb;
pub use grid::{ColoredChar, Conversion, GlyphGrid};
pub use ramp::Ramp;
pub use sampling::SampleGrid;
pub use session::{LoadOutcome, LoadState, LoadTicket, Session};
pub use settings::ConversionSettings;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicasciiError {
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Pixel access denied: {0}")]
    PixelAccessDenied(String),
    #[error("Drawing context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("Unknown character set: {0}")]
    UnknownRamp(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PicasciiError>;

/// Convert `image` under `settings` in a single pass.
///
/// Either the whole grid is produced or an error is returned; no partial
/// output escapes.
pub fn convert(image: &impl PixelSource, settings: &ConversionSettings) -> Result<Conversion> {
    settings.validate()?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PicasciiError::InvalidDimensions { width, height });
    }

    let sampling = SampleGrid::new(width, height, settings.resolution);
    tracing::debug!(
        width,
        height,
        col_stride = sampling.col_stride,
        row_stride = sampling.row_stride,
        columns = sampling.columns(),
        rows = sampling.rows(),
        ramp = %settings.char_set,
        "sampling image"
    );

    let ramp_len = settings.char_set.len();
    let (columns, rows) = (sampling.columns() as usize, sampling.rows() as usize);
    let mut grid = GlyphGrid::with_capacity(rows);
    let mut text = String::with_capacity((columns + 1) * rows);

    for y in sampling.row_positions() {
        let mut row = Vec::with_capacity(columns);
        for x in sampling.column_positions() {
            let [r, g, b, _] = image.rgba(x, y)?;
            let value = brightness::brightness([r, g, b], settings.grayscale, settings.inverted);
            let (index, ch) = settings.char_set.glyph_for(value);
            let color = if settings.grayscale {
                color::NEUTRAL
            } else {
                color::glyph_color([r, g, b], index, ramp_len)
            };
            text.push(ch);
            row.push(ColoredChar { ch, color });
        }
        text.push('\n');
        grid.push_row(row);
    }

    Ok(Conversion { text, grid })
}

/// Reusable converter configured through builder methods.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    settings: ConversionSettings,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: ConversionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.settings.resolution = resolution;
        self
    }

    pub fn with_ramp(mut self, ramp: Ramp) -> Self {
        self.settings.char_set = ramp;
        self
    }

    pub fn with_inverted(mut self, enabled: bool) -> Self {
        self.settings.inverted = enabled;
        self
    }

    pub fn with_grayscale(mut self, enabled: bool) -> Self {
        self.settings.grayscale = enabled;
        self
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    pub fn convert(&self, image: &impl PixelSource) -> Result<Conversion> {
        convert(image, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u32, height: u32, pixels: &[[u8; 3]]) -> PixelBuffer {
        let data = pixels.iter().flat_map(|&[r, g, b]| [r, g, b, 255]).collect();
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    struct Locked;

    impl PixelSource for Locked {
        fn dimensions(&self) -> (u32, u32) {
            (4, 4)
        }

        fn rgba(&self, x: u32, y: u32) -> Result<[u8; 4]> {
            if (x, y) == (0, 0) {
                Ok([0, 0, 0, 255])
            } else {
                Err(PicasciiError::PixelAccessDenied("tainted".into()))
            }
        }
    }

    struct Empty;

    impl PixelSource for Empty {
        fn dimensions(&self) -> (u32, u32) {
            (0, 5)
        }

        fn rgba(&self, _: u32, _: u32) -> Result<[u8; 4]> {
            unreachable!("no pixels to read")
        }
    }

    const WHITE: [u8; 3] = [255, 255, 255];
    const BLACK: [u8; 3] = [0, 0, 0];

    #[test]
    fn white_black_columns_at_full_resolution() {
        let image = buffer(2, 4, &[WHITE, BLACK, WHITE, BLACK, WHITE, BLACK, WHITE, BLACK]);
        let settings = ConversionSettings { resolution: 1.0, ..Default::default() };
        let out = convert(&image, &settings).unwrap();
        assert_eq!(out.text, "@ \n@ \n");
    }

    #[test]
    fn two_by_two_samples_first_row_only() {
        let image = buffer(2, 2, &[WHITE, BLACK, WHITE, BLACK]);
        let settings = ConversionSettings { resolution: 1.0, ..Default::default() };
        let out = convert(&image, &settings).unwrap();
        assert_eq!(out.text, "@ \n");
    }

    #[test]
    fn inversion_swaps_glyphs() {
        let image = buffer(2, 4, &[WHITE, BLACK, WHITE, BLACK, WHITE, BLACK, WHITE, BLACK]);
        let settings = ConversionSettings { resolution: 1.0, inverted: true, ..Default::default() };
        assert_eq!(convert(&image, &settings).unwrap().text, " @\n @\n");
    }

    #[test]
    fn single_pixel_always_one_cell() {
        let image = buffer(1, 1, &[[90, 120, 30]]);
        for resolution in [0.01, 0.05, 0.3, 1.0] {
            let settings = ConversionSettings { resolution, ..Default::default() };
            let out = convert(&image, &settings).unwrap();
            assert_eq!(out.grid.row_count(), 1);
            assert_eq!(out.grid.column_count(), 1);
            assert_eq!(out.text.len(), 2);
        }
    }

    #[test]
    fn zero_dimensions_rejected() {
        let err = convert(&Empty, &ConversionSettings::default()).unwrap_err();
        assert!(matches!(err, PicasciiError::InvalidDimensions { width: 0, height: 5 }));
    }

    #[test]
    fn read_failure_aborts_without_output() {
        let settings = ConversionSettings { resolution: 1.0, ..Default::default() };
        let err = convert(&Locked, &settings).unwrap_err();
        assert!(matches!(err, PicasciiError::PixelAccessDenied(_)));
    }

    #[test]
    fn grayscale_cells_are_white() {
        let image = buffer(2, 2, &[[10, 200, 30], BLACK, WHITE, [5, 5, 90]]);
        let settings = ConversionSettings { resolution: 1.0, ..Default::default() };
        let out = convert(&image, &settings).unwrap();
        assert!(out.grid.cells().all(|c| c.color == color::NEUTRAL));
    }

    #[test]
    fn color_mode_uses_perceived_brightness() {
        // perceived(white) is a hair under 1.0, so it lands one step short
        let image = buffer(1, 1, &[WHITE]);
        let settings =
            ConversionSettings { resolution: 1.0, grayscale: false, ..Default::default() };
        let out = convert(&image, &settings).unwrap();
        let cell = out.grid.get(0, 0).unwrap();
        assert_eq!(cell.ch, '%');
        assert_eq!(cell.color, Rgb::new(255, 255, 255));
    }

    #[test]
    fn color_mode_black_glyph_color_is_floored() {
        let image = buffer(1, 1, &[BLACK]);
        let settings =
            ConversionSettings { resolution: 1.0, grayscale: false, ..Default::default() };
        let cell = *convert(&image, &settings).unwrap().grid.get(0, 0).unwrap();
        assert_eq!(cell, ColoredChar { ch: ' ', color: Rgb::new(40, 40, 40) });
    }

    #[test]
    fn builder_matches_free_function() {
        let image = buffer(3, 2, &[WHITE, BLACK, [128, 64, 32], BLACK, WHITE, [1, 2, 3]]);
        let converter = Converter::new()
            .with_resolution(1.0)
            .with_ramp(Ramp::Detailed)
            .with_inverted(true)
            .with_grayscale(false);
        assert_eq!(converter.settings().char_set, Ramp::Detailed);
        assert_eq!(
            converter.convert(&image).unwrap(),
            convert(&image, converter.settings()).unwrap()
        );
    }

    #[test]
    fn invalid_resolution_rejected_before_sampling() {
        let image = buffer(1, 1, &[WHITE]);
        let err = Converter::new().with_resolution(0.0).convert(&image).unwrap_err();
        assert!(matches!(err, PicasciiError::InvalidSettings(_)));
    }
}
