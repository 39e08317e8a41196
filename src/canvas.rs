//! Rasterize a glyph grid into an image, one monospace cell per glyph.

use crate::grid::GlyphGrid;
use crate::{PicasciiError, Result};
use fontdue::{Font, FontSettings, Metrics};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;

pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Largest canvas `render` will allocate: 64 Mpx, 256 MiB of RGBA.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// Pixel size of a canvas holding `cols` x `rows` cells.
///
/// Fails with `ContextUnavailable` when a side overflows `u32` or the area
/// exceeds [`MAX_CANVAS_PIXELS`].
pub fn canvas_size(cols: usize, rows: usize, cell_w: u32, line_h: u32) -> Result<(u32, u32)> {
    let side = |cells: usize, px: u32| {
        u32::try_from(cells).ok().and_then(|n| n.checked_mul(px)).map(|v| v.max(1))
    };
    let (Some(w), Some(h)) = (side(cols, cell_w), side(rows, line_h)) else {
        return Err(PicasciiError::ContextUnavailable(format!(
            "{cols}x{rows} cells do not fit a canvas"
        )));
    };
    if w as u64 * h as u64 > MAX_CANVAS_PIXELS {
        return Err(PicasciiError::ContextUnavailable(format!(
            "{w}x{h} canvas exceeds {MAX_CANVAS_PIXELS} pixels"
        )));
    }
    Ok((w, h))
}

pub struct CanvasRenderer {
    font: Font,
    px: f32,
    cell_w: u32,
    line_h: u32,
    ascent: f32,
}

impl CanvasRenderer {
    /// Load a monospace font at `px` pixels.
    pub fn new(font_bytes: &[u8], px: f32) -> Result<Self> {
        if !px.is_finite() || px <= 0.0 {
            return Err(PicasciiError::InvalidSettings(format!(
                "font size must be positive, got {px}"
            )));
        }
        let font = Font::from_bytes(font_bytes, FontSettings::default())
            .map_err(|e| PicasciiError::ContextUnavailable(format!("font: {e}")))?;
        let line = font.horizontal_line_metrics(px).ok_or_else(|| {
            PicasciiError::ContextUnavailable("font has no horizontal metrics".into())
        })?;
        let cell_w = font.metrics('M', px).advance_width.ceil().max(1.0) as u32;
        let line_h = line.new_line_size.ceil().max(1.0) as u32;
        Ok(Self { font, px, cell_w, line_h, ascent: line.ascent })
    }

    /// Cell width and line height in pixels.
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_w, self.line_h)
    }

    /// Draw each cell at `(col * cell_w, row * line_h)` in its own color.
    pub fn render(&self, grid: &GlyphGrid) -> Result<RgbaImage> {
        let (w, h) = canvas_size(grid.column_count(), grid.row_count(), self.cell_w, self.line_h)?;
        let mut canvas = RgbaImage::from_pixel(w, h, BACKGROUND);
        let mut cache: HashMap<char, (Metrics, Vec<u8>)> = HashMap::new();

        for (row, cells) in grid.rows().iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.ch == ' ' {
                    continue;
                }
                let (metrics, bitmap) =
                    cache.entry(cell.ch).or_insert_with(|| self.font.rasterize(cell.ch, self.px));

                let origin_x = (col as u32 * self.cell_w) as i32 + metrics.xmin;
                let baseline = (row as u32 * self.line_h) as f32 + self.ascent;
                let origin_y = baseline.round() as i32 - metrics.height as i32 - metrics.ymin;
                let tint = cell.color.to_array();

                for gy in 0..metrics.height {
                    for gx in 0..metrics.width {
                        let coverage = bitmap[gy * metrics.width + gx];
                        if coverage == 0 {
                            continue;
                        }
                        let (x, y) = (origin_x + gx as i32, origin_y + gy as i32);
                        if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
                            continue;
                        }
                        let dst = canvas.get_pixel_mut(x as u32, y as u32);
                        blend(dst, tint, coverage);
                    }
                }
            }
        }

        Ok(canvas)
    }
}

fn blend(dst: &mut Rgba<u8>, tint: [u8; 3], coverage: u8) {
    let a = coverage as u16;
    for (d, s) in dst.0.iter_mut().zip(tint) {
        *d = ((s as u16 * a + *d as u16 * (255 - a)) / 255) as u8;
    }
}
