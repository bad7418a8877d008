//! Terminal rendering.
//!
//! A small game-oriented layer over `crossterm`: the [`BoardView`] mirrors a
//! game from its events and draws into a [`FrameBuffer`], which the
//! [`TerminalRenderer`] flushes to the terminal.

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use board_view::{BoardView, FRAME_HEIGHT, FRAME_WIDTH};
pub use fb::{FrameBuffer, Glyph, Style};
pub use renderer::{encode_changed_lines, TerminalRenderer};
