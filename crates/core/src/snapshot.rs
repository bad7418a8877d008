use crate::types::{Cell, GameStatus, Point, ShapeId, COL, ROW};

/// Point-in-time copy of everything a game owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; COL]; ROW],
    pub status: GameStatus,
    pub current: ShapeId,
    pub next: ShapeId,
    pub position: Point,
    pub score: u64,
    pub level: u8,
    pub rows_cleared: u32,
    pub water_level: usize,
}

impl GameSnapshot {
    pub fn occupied(&self, col: usize, row: usize) -> bool {
        row < ROW && col < COL && self.board[row][col] > 0
    }

    /// Number of filled board cells (the active shape is not part of it).
    pub fn occupied_count(&self) -> usize {
        self.board.iter().flatten().filter(|&&c| c > 0).count()
    }
}
