//! BoardView: a mirror of the game built purely from its events.
//!
//! The view never looks at engine state. It replays `GameEvent`s into its own
//! copy of the board and counters, then draws that copy into a framebuffer.
//! This module is pure (no I/O) and unit-tested.

use crossterm::style::Color;

use crate::core::ShapeCatalog;
use crate::fb::{FrameBuffer, Style};
use crate::types::{
    Cell, GameEvent, GameStatus, Point, ShapeId, Transition, COL, ROW, SHAPE_SIZE,
};

/// Terminal columns per board cell.
const CELL_W: u16 = 2;
const BOARD_X: u16 = 1;
const BOARD_Y: u16 = 1;
const PANEL_X: u16 = BOARD_X + COL as u16 * CELL_W + 3;
const PANEL_W: u16 = 14;

/// Frame width and height needed to draw the whole view.
pub const FRAME_WIDTH: u16 = PANEL_X + PANEL_W;
pub const FRAME_HEIGHT: u16 = ROW as u16 + 3;

const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Red,
    Color::Blue,
];

pub struct BoardView {
    catalog: &'static ShapeCatalog,
    board: [[Cell; COL]; ROW],
    active: Option<(ShapeId, Point)>,
    next: Option<ShapeId>,
    status: GameStatus,
    score: u64,
    level: u8,
    highlight: Option<usize>,
}

impl BoardView {
    pub fn new(catalog: &'static ShapeCatalog) -> Self {
        Self {
            catalog,
            board: [[0; COL]; ROW],
            active: None,
            next: None,
            status: GameStatus::Zero,
            score: 0,
            level: 0,
            highlight: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn next(&self) -> Option<ShapeId> {
        self.next
    }

    pub fn active(&self) -> Option<(ShapeId, Point)> {
        self.active
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Locked cell at `(col, row)`; 0 outside the board.
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.board
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Moving {
                moving,
                transition,
                shape,
                ..
            } => match transition {
                Transition::Locked => {
                    self.stamp(*shape, moving.to);
                    self.active = None;
                }
                Transition::Spawned | Transition::Moved | Transition::RotatedInPlace => {
                    self.active = Some((*shape, moving.to));
                }
            },
            GameEvent::NextPreview { shape } => self.next = Some(*shape),
            GameEvent::StateChanged(status) => {
                self.status = *status;
                if *status == GameStatus::Zero {
                    self.reset();
                }
            }
            GameEvent::LevelChanged { level } => self.level = *level,
            GameEvent::ScoreChanged { score } => self.score = *score,
            GameEvent::RedrawArea { top, rows, .. } => {
                for (offset, row) in rows.iter().enumerate() {
                    if let Some(dst) = self.board.get_mut(top + offset) {
                        *dst = *row;
                    }
                }
                self.highlight = None;
            }
            GameEvent::HighlightRow { row } => self.highlight = Some(*row),
        }
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        fb.clear();
        self.draw_well(fb);
        self.draw_board(fb);
        if let Some((shape, at)) = self.active {
            self.draw_active(fb, shape, at);
        }
        self.draw_panel(fb);
        fb.text(
            BOARD_X,
            FRAME_HEIGHT - 1,
            "n start  p pause  q quit",
            Style::fg(Color::DarkGrey),
        );
    }

    fn reset(&mut self) {
        self.board = [[0; COL]; ROW];
        self.active = None;
        self.score = 0;
        self.level = 0;
        self.highlight = None;
    }

    fn stamp(&mut self, shape: ShapeId, at: Point) {
        for (col, row, value) in self.catalog.shape(shape).filled_cells() {
            let (col, row) = (at.col + col, at.row + row);
            if (0..COL as i32).contains(&col) && (0..ROW as i32).contains(&row) {
                self.board[row as usize][col as usize] = value;
            }
        }
    }

    fn draw_well(&self, fb: &mut FrameBuffer) {
        let frame = Style::fg(Color::Grey);
        let w = COL as u16 * CELL_W;
        let h = ROW as u16;
        for y in BOARD_Y..BOARD_Y + h {
            fb.put(BOARD_X - 1, y, '│', frame);
            fb.put(BOARD_X + w, y, '│', frame);
        }
        fb.put(BOARD_X - 1, BOARD_Y + h, '└', frame);
        fb.fill(BOARD_X, BOARD_Y + h, w, 1, '─', frame);
        fb.put(BOARD_X + w, BOARD_Y + h, '┘', frame);
    }

    fn draw_board(&self, fb: &mut FrameBuffer) {
        let empty = Style::fg(Color::DarkGrey);
        for (row, cells) in self.board.iter().enumerate() {
            let flash = self.highlight == Some(row);
            for (col, &value) in cells.iter().enumerate() {
                let (x, y) = cell_origin(col as i32, row as i32);
                if flash {
                    fb.fill(x, y, CELL_W, 1, '▓', Style::fg(Color::White).bold());
                } else if value > 0 {
                    fb.fill(x, y, CELL_W, 1, '█', Style::fg(palette(value)));
                } else {
                    fb.text(x, y, " .", empty);
                }
            }
        }
    }

    fn draw_active(&self, fb: &mut FrameBuffer, shape: ShapeId, at: Point) {
        let style = Style::fg(Color::White).bold();
        for (col, row, _) in self.catalog.shape(shape).filled_cells() {
            let (col, row) = (at.col + col, at.row + row);
            if (0..COL as i32).contains(&col) && (0..ROW as i32).contains(&row) {
                let (x, y) = cell_origin(col, row);
                fb.fill(x, y, CELL_W, 1, '█', style);
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer) {
        let label = Style::fg(Color::White).bold();
        let value = Style::fg(Color::Grey);
        let mut y = BOARD_Y;

        fb.text(PANEL_X, y, "NEXT", label);
        y += 1;
        if let Some(next) = self.next {
            let shape = self.catalog.shape(next);
            for (col, row, _) in shape.filled_cells() {
                let x = PANEL_X + col as u16 * CELL_W;
                fb.fill(x, y + row as u16, CELL_W, 1, '█', Style::fg(Color::Cyan));
            }
        }
        y += SHAPE_SIZE as u16 + 1;

        fb.text(PANEL_X, y, "SCORE", label);
        fb.text(PANEL_X, y + 1, &self.score.to_string(), value);
        y += 3;

        fb.text(PANEL_X, y, "LEVEL", label);
        fb.text(PANEL_X, y + 1, &self.level.to_string(), value);
        y += 3;

        let (text, color) = match self.status {
            GameStatus::Zero => ("READY", Color::Grey),
            GameStatus::Gaming => ("PLAYING", Color::Green),
            GameStatus::Paused => ("PAUSED", Color::Yellow),
            GameStatus::GameOver => ("GAME OVER", Color::Red),
        };
        fb.text(PANEL_X, y, text, Style::fg(color).bold());
    }
}

fn cell_origin(col: i32, row: i32) -> (u16, u16) {
    (BOARD_X + col as u16 * CELL_W, BOARD_Y + row as u16)
}

fn palette(value: Cell) -> Color {
    PALETTE[(value as usize - 1) % PALETTE.len()]
}
