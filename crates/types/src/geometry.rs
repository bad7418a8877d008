//! Board coordinates, rectangles and position transitions.
//!
//! Columns grow to the right and rows grow downwards; `(0, 0)` is the top-left
//! board cell. A [`Point`] is the origin of a shape's 4x4 local grid, so it may
//! sit left of or above the board while the shape's filled cells are inside.

use thiserror::Error;

use crate::{COL, ROW, SHAPE_SIZE};

/// Smallest origin coordinate a shape grid may take.
const MIN_ORIGIN: i32 = -(SHAPE_SIZE as i32 - 1);

/// A raw coordinate shift left the origin range.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("position ({col}, {row}) is out of bounds")]
pub struct OutOfBounds {
    pub col: i32,
    pub row: i32,
}

/// Board position of a shape origin, together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub col: i32,
    pub row: i32,
    pub from_col: i32,
    pub from_row: i32,
}

impl Point {
    /// "No position". Any row at or below `-SHAPE_SIZE` is invalid.
    pub const INVALID: Point = Point {
        col: 0,
        row: -(SHAPE_SIZE as i32),
        from_col: 0,
        from_row: -(SHAPE_SIZE as i32),
    };

    /// A fresh point with no history.
    pub const fn at(col: i32, row: i32) -> Self {
        Self {
            col,
            row,
            from_col: Self::INVALID.col,
            from_row: Self::INVALID.row,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.row > Self::INVALID.row
    }

    /// The position this point moved from (invalid for fresh points).
    pub fn previous(&self) -> Point {
        Point::at(self.from_col, self.from_row)
    }

    /// Same cell, ignoring history.
    pub fn same_cell(&self, other: &Point) -> bool {
        self.col == other.col && self.row == other.row
    }

    pub fn moved_left(self) -> Result<Point, OutOfBounds> {
        self.shifted(-1, 0)
    }

    pub fn moved_right(self) -> Result<Point, OutOfBounds> {
        self.shifted(1, 0)
    }

    pub fn moved_down(self) -> Result<Point, OutOfBounds> {
        self.shifted(0, 1)
    }

    fn shifted(self, dcol: i32, drow: i32) -> Result<Point, OutOfBounds> {
        let col = self.col + dcol;
        let row = self.row + drow;
        if !(MIN_ORIGIN..COL as i32).contains(&col) || !(MIN_ORIGIN..ROW as i32).contains(&row) {
            return Err(OutOfBounds { col, row });
        }
        Ok(Point {
            col,
            row,
            from_col: self.col,
            from_row: self.row,
        })
    }
}

/// Inclusive axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Area {
    pub min_col: i32,
    pub min_row: i32,
    pub max_col: i32,
    pub max_row: i32,
}

impl Area {
    pub const fn new(min_col: i32, min_row: i32, max_col: i32, max_row: i32) -> Self {
        Self {
            min_col,
            min_row,
            max_col,
            max_row,
        }
    }

    /// True if either corner lies outside the board.
    pub fn out_of_bounds(&self) -> bool {
        cell_out_of_bounds(self.min_col, self.min_row) || cell_out_of_bounds(self.max_col, self.max_row)
    }

    pub fn translate(&self, dcol: i32, drow: i32) -> Area {
        Area::new(
            self.min_col + dcol,
            self.min_row + drow,
            self.max_col + dcol,
            self.max_row + drow,
        )
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        (self.min_col..=self.max_col).contains(&col) && (self.min_row..=self.max_row).contains(&row)
    }

    pub fn width(&self) -> i32 {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> i32 {
        self.max_row - self.min_row + 1
    }
}

/// Whether a single board cell coordinate lies outside the board.
pub fn cell_out_of_bounds(col: i32, row: i32) -> bool {
    col < 0 || col > COL as i32 - 1 || row < 0 || row > ROW as i32 - 1
}

/// One position or orientation change of the active shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Moving {
    pub from: Point,
    pub to: Point,
}

impl Moving {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// A change that keeps the origin where it was (rotation, lock-in).
    pub fn in_place(at: Point) -> Self {
        Self { from: at, to: at }
    }

    pub fn is_in_place(&self) -> bool {
        self.from.same_cell(&self.to)
    }
}
