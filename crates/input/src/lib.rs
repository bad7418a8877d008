//! Terminal input.
//!
//! Maps `crossterm` key events onto engine [`Command`](crate::types::Command)s.
//! There is no key repeat handling here; the engine has no soft drop, so
//! every press is one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
