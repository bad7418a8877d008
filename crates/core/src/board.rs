//! Board module - manages the game grid
//!
//! The board is an 11x19 grid of cell values (0 = empty). Uses a flat array,
//! row-major, so whole rows can be shifted with a single `copy_within`.
//! Coordinates: (col, row) where col ranges 0..=10 (left to right) and row
//! ranges 0..=18 (top to bottom).
//!
//! The board also tracks a *water level*: the topmost row that has ever held
//! a cell. Rows above it are known to be empty, which bounds how far gravity
//! compaction has to shift after a line clear.

use arrayvec::ArrayVec;

use crate::catalog::Shape;
use crate::types::{Cell, Point, Row, COL, ROW};

/// Total number of cells on the board
const BOARD_SIZE: usize = ROW * COL;

/// Row indices removed by one [`Board::promote`] pass, in clear order.
pub type ClearedRows = ArrayVec<usize, ROW>;

/// Progress reported by [`Board::promote`] for every complete row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearStep {
    /// `row` is complete and about to be removed.
    Highlight { row: usize },
    /// Rows `top..=bottom` were shifted; `top` was the water level before.
    Compacted { top: usize, bottom: usize },
}

/// The game board - 11 columns x 19 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
    water_level: usize,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
            water_level: ROW,
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i32, row: i32) -> Option<usize> {
        if col < 0 || col >= COL as i32 || row < 0 || row >= ROW as i32 {
            return None;
        }
        Some(row as usize * COL + col as usize)
    }

    pub fn width(&self) -> usize {
        COL
    }

    pub fn height(&self) -> usize {
        ROW
    }

    /// Get cell at (col, row); `None` if out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row); returns false if out of bounds.
    ///
    /// Filling a cell above the water level raises it.
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                if cell > 0 {
                    self.water_level = self.water_level.min(row as usize);
                }
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        matches!(self.get(col, row), Some(c) if c > 0)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROW {
            return false;
        }
        let start = row * COL;
        self.cells[start..start + COL].iter().all(|&cell| cell > 0)
    }

    /// Copy of one row (all empty when out of range).
    pub fn row(&self, row: usize) -> Row {
        let mut out = [0; COL];
        if row < ROW {
            let start = row * COL;
            out.copy_from_slice(&self.cells[start..start + COL]);
        }
        out
    }

    /// Copies of rows `top..=bottom`.
    pub fn rows(&self, top: usize, bottom: usize) -> Vec<Row> {
        (top..=bottom.min(ROW - 1)).map(|row| self.row(row)).collect()
    }

    /// Topmost row that may hold cells; `ROW` when the board is untouched.
    pub fn water_level(&self) -> usize {
        self.water_level
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell > 0).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [0; BOARD_SIZE];
        self.water_level = ROW;
    }

    /// Whether `shape` at `pos` overlaps an occupied cell.
    ///
    /// Only the shape's bounding box is visited. A filled shape cell that
    /// lands outside the grid counts as a conflict.
    pub fn conflict(&self, shape: &Shape, pos: Point) -> bool {
        shape
            .filled_cells()
            .any(|(col, row, _)| !matches!(self.get(pos.col + col, pos.row + row), Some(0)))
    }

    /// Freeze `shape` into the board at `pos`.
    pub fn lock_in(&mut self, shape: &Shape, pos: Point) {
        for (col, row, value) in shape.filled_cells() {
            self.set(pos.col + col, pos.row + row, value);
        }
    }

    /// Lower the water level to the top edge of a landed shape.
    pub fn settle(&mut self, shape: &Shape, pos: Point) {
        let top = pos.row + shape.bounds().min_row;
        if top >= 0 {
            self.water_level = self.water_level.min(top as usize);
        }
    }

    /// Remove every complete row from `from_row` down to the last row.
    ///
    /// For each complete row, `on_step` sees a [`ClearStep::Highlight`] before
    /// the row disappears and a [`ClearStep::Compacted`] once the rows between
    /// the water level and it have shifted down by one. The same index is
    /// examined again after a shift since the row above moved into it.
    pub fn promote(
        &mut self,
        from_row: usize,
        mut on_step: impl FnMut(&Board, ClearStep),
    ) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut row = from_row;

        while row < ROW {
            if !self.is_row_full(row) {
                row += 1;
                continue;
            }

            on_step(self, ClearStep::Highlight { row });

            let top = self.water_level.min(row);
            self.compact(top, row);
            self.water_level = (top + 1).min(ROW);
            cleared.push(row);

            on_step(self, ClearStep::Compacted { top, bottom: row });
        }

        cleared
    }

    /// Drop rows `top..row` by one onto `row`, emptying `top`.
    fn compact(&mut self, top: usize, row: usize) {
        if top < row {
            // copy_within handles the overlapping ranges
            self.cells.copy_within(top * COL..row * COL, (top + 1) * COL);
        }
        self.cells[top * COL..(top + 1) * COL].fill(0);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
