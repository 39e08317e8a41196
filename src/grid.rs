//! Output grid of colored glyphs.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredChar {
    pub ch: char,
    pub color: Rgb,
}

/// Rows of cells in sampling order. Every row has the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<ColoredChar>>", into = "Vec<Vec<ColoredChar>>")]
pub struct GlyphGrid {
    rows: Vec<Vec<ColoredChar>>,
}

impl GlyphGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rows: usize) -> Self {
        Self { rows: Vec::with_capacity(rows) }
    }

    pub fn push_row(&mut self, row: Vec<ColoredChar>) {
        debug_assert!(self.rows.first().map_or(true, |first| first.len() == row.len()));
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<ColoredChar>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&ColoredChar> {
        self.rows.get(row)?.get(col)
    }

    pub fn cells(&self) -> impl Iterator<Item = &ColoredChar> {
        self.rows.iter().flatten()
    }

    /// Plain text: each row's glyphs, every row terminated by `\n`.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.row_count() * (self.column_count() + 1));
        for row in &self.rows {
            out.extend(row.iter().map(|cell| cell.ch));
            out.push('\n');
        }
        out
    }

    /// Text with 24-bit ANSI foreground escapes, reset at the end of each row.
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let mut current: Option<Rgb> = None;
            for cell in row {
                if current != Some(cell.color) {
                    let Rgb { r, g, b } = cell.color;
                    out.push_str(&format!("\x1b[38;2;{r};{g};{b}m"));
                    current = Some(cell.color);
                }
                out.push(cell.ch);
            }
            out.push_str("\x1b[0m\n");
        }
        out
    }
}

impl TryFrom<Vec<Vec<ColoredChar>>> for GlyphGrid {
    type Error = String;

    fn try_from(rows: Vec<Vec<ColoredChar>>) -> Result<Self, Self::Error> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(format!(
                "row {index} has {} cells, expected {width} like row 0",
                row.len()
            ));
        }
        Ok(Self { rows })
    }
}

impl From<GlyphGrid> for Vec<Vec<ColoredChar>> {
    fn from(grid: GlyphGrid) -> Self {
        grid.rows
    }
}

/// Result of one conversion: the text form and the grid it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub text: String,
    pub grid: GlyphGrid,
}

impl Conversion {
    /// Text rows without their newlines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}
