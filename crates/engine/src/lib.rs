//! Threaded game engine.
//!
//! Wraps a [`GameState`](blockfall_core::GameState) in a mutex shared with one
//! fall worker thread, and hands every notification to the consumer over a
//! bounded channel. See [`Game`] for the threading contract.

pub mod config;
pub mod error;
pub mod game;

pub use config::{ConfigError, EngineConfig};
pub use error::EngineError;
pub use game::Game;
