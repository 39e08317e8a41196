//! Sampling grid: which source pixels become output cells.

/// Monospace glyphs are about twice as tall as they are wide, so rows are
/// sampled this much more sparsely than columns.
pub const CHAR_ASPECT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGrid {
    width: u32,
    height: u32,
    /// Target number of sample columns, at least 1.
    pub sample_cols: u32,
    /// Target number of sample rows before aspect correction, at least 1.
    pub sample_rows: u32,
    pub col_stride: u32,
    pub row_stride: u32,
}

impl SampleGrid {
    /// Strides for an image of `width` x `height` at `resolution`.
    ///
    /// Callers reject zero dimensions beforehand; a zero here still yields a
    /// well-formed grid that walks no pixels.
    pub fn new(width: u32, height: u32, resolution: f64) -> Self {
        let sample_cols = ((width as f64 * resolution).floor() as u32).max(1);
        let sample_rows = ((height as f64 * resolution).floor() as u32).max(1);

        let col_stride = ((width as f64 / sample_cols as f64).ceil() as u32).max(1);
        let row_stride =
            ((height as f64 / sample_rows as f64 / CHAR_ASPECT).ceil() as u32).max(1);

        Self { width, height, sample_cols, sample_rows, col_stride, row_stride }
    }

    /// Number of cells per output row: how many column strides fit.
    pub fn columns(&self) -> u32 {
        self.width.div_ceil(self.col_stride)
    }

    /// Number of output rows: how many row strides fit.
    pub fn rows(&self) -> u32 {
        self.height.div_ceil(self.row_stride)
    }

    /// Y coordinates of the sampled rows, top to bottom.
    pub fn row_positions(&self) -> impl Iterator<Item = u32> {
        (0..self.height).step_by(self.row_stride as usize)
    }

    /// X coordinates sampled within each row, left to right.
    pub fn column_positions(&self) -> impl Iterator<Item = u32> {
        (0..self.width).step_by(self.col_stride as usize)
    }

    /// Every sampled `(x, y)` in walk order.
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.row_positions()
            .flat_map(move |y| self.column_positions().map(move |x| (x, y)))
    }
}
