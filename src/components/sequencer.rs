//! Frame sequencer: which cell is drawn and when a cycle completes.
//!
//! Two positions are tracked and they are allowed to drift apart:
//!
//! - `current_frame` counts ticks since the last reset and wraps once it
//!   reaches `last_frame`.
//! - (`render_column`, `render_row`) is the grid cell being drawn. It moves
//!   one cell per completed draw and wraps purely on the grid size.
//!
//! When `last_frame` differs from `columns × rows` the two wrap at different
//! moments. Hosts rely on this to play a partial sheet or to keep scanning
//! past the counter's cycle, so it must not be "fixed" here.

use crate::components::grid::GridConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequencer {
    columns: u32,
    rows: u32,
    last_frame: u32,
    fixed_row: bool,
    render_row: u32,
    render_column: u32,
    current_frame: u32,
}

impl Default for FrameSequencer {
    fn default() -> Self {
        let grid = GridConfig::default();
        FrameSequencer::new(&grid, grid.cell_count(), false, 0)
    }
}

impl FrameSequencer {
    pub fn new(grid: &GridConfig, last_frame: u32, fixed_row: bool, render_row: u32) -> Self {
        let mut sequencer = Self {
            columns: grid.columns(),
            rows: grid.rows(),
            last_frame,
            fixed_row,
            render_row: 0,
            render_column: 0,
            current_frame: 0,
        };
        sequencer.render_row = render_row.min(sequencer.rows - 1);
        sequencer
    }

    /// Adopt new bounds, keeping the current position when it still fits.
    ///
    /// A position outside the new grid is wrapped back inside it.
    pub fn configure(&mut self, grid: &GridConfig, last_frame: u32, fixed_row: bool) {
        self.columns = grid.columns();
        self.rows = grid.rows();
        self.last_frame = last_frame;
        self.fixed_row = fixed_row;
        self.render_column %= self.columns;
        self.render_row %= self.rows;
        self.current_frame = self.current_frame.min(self.last_frame);
    }

    /// Move the drawn row, e.g. to pick the strip a fixed-row animation scans.
    pub fn set_render_row(&mut self, render_row: u32) {
        self.render_row = render_row.min(self.rows - 1);
    }

    /// Advance the frame counter by one tick.
    ///
    /// The wrap check runs before the increment: the tick that finds the
    /// counter at `last_frame` resets it and then counts itself as frame 1
    /// of the next cycle, so the loop never repeats its last frame.
    pub fn advance(&mut self) {
        if self.current_frame >= self.last_frame {
            self.reset();
        }
        self.current_frame += 1;
    }

    /// Move to the next grid cell after a completed draw.
    pub fn advance_grid_position(&mut self) {
        if self.render_column == self.columns - 1 && !self.fixed_row {
            self.render_row = (self.render_row + 1) % self.rows;
        }
        self.render_column = (self.render_column + 1) % self.columns;
    }

    /// Back to the first cell. A fixed row keeps its row.
    pub fn reset(&mut self) {
        if !self.fixed_row {
            self.render_row = 0;
        }
        self.render_column = 0;
        self.current_frame = 0;
    }

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn render_row(&self) -> u32 {
        self.render_row
    }

    pub fn render_column(&self) -> u32 {
        self.render_column
    }

    pub fn last_frame(&self) -> u32 {
        self.last_frame
    }

    pub fn fixed_row(&self) -> bool {
        self.fixed_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequencer(columns: i32, rows: i32, fixed_row: bool) -> FrameSequencer {
        let grid = GridConfig::new(columns, rows);
        FrameSequencer::new(&grid, grid.cell_count(), fixed_row, 0)
    }

    #[test]
    fn counter_wraps_after_last_frame_then_increments() {
        let mut seq = sequencer(4, 4, false);
        for _ in 0..16 {
            seq.advance();
        }
        assert_eq!(seq.current_frame(), 16);

        seq.advance();
        assert_eq!(seq.current_frame(), 1);
    }

    #[test]
    fn counter_cycles_through_one_to_last_frame() {
        let grid = GridConfig::new(2, 2);
        let mut seq = FrameSequencer::new(&grid, 3, false, 0);
        let seen: Vec<u32> = (0..8)
            .map(|_| {
                seq.advance();
                seq.current_frame()
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 3, 1, 2, 3, 1, 2]);
    }

    #[test]
    fn zero_last_frame_pins_counter_at_one() {
        let grid = GridConfig::new(2, 2);
        let mut seq = FrameSequencer::new(&grid, 0, false, 0);
        for _ in 0..5 {
            seq.advance();
            assert_eq!(seq.current_frame(), 1);
        }
    }

    #[test]
    fn grid_returns_home_after_every_cell() {
        let mut seq = sequencer(3, 2, false);
        let mut visited = Vec::new();
        for _ in 0..6 {
            visited.push((seq.render_column(), seq.render_row()));
            seq.advance_grid_position();
        }
        assert_eq!(
            visited,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
        assert_eq!((seq.render_column(), seq.render_row()), (0, 0));
    }

    #[test]
    fn fixed_row_never_changes_row() {
        let grid = GridConfig::new(4, 3);
        let mut seq = FrameSequencer::new(&grid, 12, true, 2);
        for _ in 0..25 {
            seq.advance_grid_position();
            seq.advance();
            assert_eq!(seq.render_row(), 2);
        }
        seq.reset();
        assert_eq!(seq.render_row(), 2);
        assert_eq!(seq.render_column(), 0);
    }

    #[test]
    fn reset_returns_to_origin_without_fixed_row() {
        let mut seq = sequencer(2, 2, false);
        for _ in 0..3 {
            seq.advance();
            seq.advance_grid_position();
        }
        assert_eq!((seq.render_column(), seq.render_row()), (1, 1));
        seq.reset();
        assert_eq!((seq.render_column(), seq.render_row()), (0, 0));
        assert_eq!(seq.current_frame(), 0);
    }

    #[test]
    fn grid_wrap_is_independent_of_last_frame() {
        let grid = GridConfig::new(2, 2);
        let mut seq = FrameSequencer::new(&grid, 10, false, 0);
        for _ in 0..5 {
            seq.advance();
            seq.advance_grid_position();
        }
        // grid wrapped once, the counter did not
        assert_eq!(seq.current_frame(), 5);
        assert_eq!((seq.render_column(), seq.render_row()), (1, 0));
    }

    #[test]
    fn counter_reset_pulls_grid_back_to_origin() {
        let grid = GridConfig::new(2, 2);
        let mut seq = FrameSequencer::new(&grid, 2, false, 0);
        for _ in 0..3 {
            seq.advance();
            seq.advance_grid_position();
        }
        assert_eq!(seq.current_frame(), 1);
        assert_eq!((seq.render_column(), seq.render_row()), (1, 0));
    }

    #[test]
    fn configure_wraps_position_into_smaller_grid() {
        let mut seq = sequencer(4, 4, false);
        for _ in 0..7 {
            seq.advance_grid_position();
        }
        assert_eq!((seq.render_column(), seq.render_row()), (3, 1));
        seq.configure(&GridConfig::new(2, 1), 2, false);
        assert_eq!((seq.render_column(), seq.render_row()), (1, 0));
    }

    #[test]
    fn initial_row_is_clamped_into_grid() {
        let grid = GridConfig::new(2, 3);
        let seq = FrameSequencer::new(&grid, 6, true, 9);
        assert_eq!(seq.render_row(), 2);
    }
}
