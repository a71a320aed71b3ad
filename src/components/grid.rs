//! Sprite-sheet grid geometry.
//!
//! A sprite sheet is split into `columns × rows` cells of equal size. Cell
//! sizes are kept as floating point and only truncated to integer pixels
//! when a source rectangle is built for drawing.
//!
//! # Related
//!
//! - [`crate::components::sequencer::FrameSequencer`] – decides which cell is active
//! - [`crate::systems::render::render_frame`] – blits the active cell

use serde::{Deserialize, Serialize};

use crate::components::spritesheet::SpriteSheet;

/// Number of columns and rows a sprite sheet is divided into.
///
/// Both values are always at least 1; non-positive input is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGrid", into = "RawGrid")]
pub struct GridConfig {
    columns: u32,
    rows: u32,
}

#[derive(Serialize, Deserialize)]
struct RawGrid {
    columns: i32,
    rows: i32,
}

impl From<RawGrid> for GridConfig {
    fn from(raw: RawGrid) -> Self {
        GridConfig::new(raw.columns, raw.rows)
    }
}

impl From<GridConfig> for RawGrid {
    fn from(grid: GridConfig) -> Self {
        RawGrid {
            columns: grid.columns as i32,
            rows: grid.rows as i32,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig::new(4, 4)
    }
}

impl GridConfig {
    pub fn new(columns: i32, rows: i32) -> Self {
        Self {
            columns: columns.max(1) as u32,
            rows: rows.max(1) as u32,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of cells in the grid, the default `last_frame`.
    pub fn cell_count(&self) -> u32 {
        self.columns.saturating_mul(self.rows)
    }

    pub fn with_columns(self, columns: i32) -> Self {
        GridConfig::new(columns, self.rows as i32)
    }

    pub fn with_rows(self, rows: i32) -> Self {
        GridConfig::new(self.columns as i32, rows)
    }
}

/// Integer pixel rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at the origin covering `width × height`.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left.saturating_add(dx),
            self.top.saturating_add(dy),
            self.right.saturating_add(dx),
            self.bottom.saturating_add(dy),
        )
    }
}

/// Cell size in pixels for `sheet` divided by `grid`.
///
/// Returns `(0.0, 0.0)` when there is no sheet; callers skip drawing then.
pub fn cell_size(sheet: Option<&SpriteSheet>, grid: &GridConfig) -> (f64, f64) {
    match sheet {
        Some(sheet) => (
            sheet.width as f64 / grid.columns() as f64,
            sheet.height as f64 / grid.rows() as f64,
        ),
        None => (0.0, 0.0),
    }
}

/// Source rectangle of the cell at (`column`, `row`).
///
/// Edges are computed in floating point and truncated toward zero, so a
/// fractional cell size never accumulates error across the sheet.
pub fn cell_bounds(column: u32, row: u32, cell_width: f64, cell_height: f64) -> PixelRect {
    let left = column as f64 * cell_width;
    let top = row as f64 * cell_height;
    PixelRect {
        left: left as i32,
        top: top as i32,
        right: (left + cell_width) as i32,
        bottom: (top + cell_height) as i32,
    }
}
