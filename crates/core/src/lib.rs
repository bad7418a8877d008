//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and nothing else: no threads, no
//! clocks, no terminal. The threaded engine and the terminal boundary build on
//! top of it.
//!
//! # Module Structure
//!
//! - [`catalog`]: the 54 shape rotation classes, their bounding boxes and the
//!   rotation graph, validated once at startup
//! - [`board`]: 11x19 board with conflict tests, lock-in and row promotion
//! - [`game_state`]: the lifecycle state machine and player operations
//! - [`scoring`]: line-clear points, leveling and the fall speed table
//! - [`rng`]: seedable shape selection
//! - [`events`]: sinks the game emits its notifications into
//! - [`snapshot`]: point-in-time copies for rendering and assertions
//!
//! # Example
//!
//! ```
//! use blockfall_core::{catalog, GameState, SimpleRng};
//! use blockfall_core::types::GameStatus;
//!
//! let shapes = catalog::init().expect("catalog");
//! let mut game = GameState::new(shapes, SimpleRng::new(12345), Vec::new());
//! assert!(game.start());
//! assert_eq!(game.status(), GameStatus::Gaming);
//!
//! game.move_left();
//! game.drop_down();
//! game.fall_step();
//! assert!(!game.events().is_empty());
//! ```

pub mod board;
pub mod catalog;
pub mod events;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, ClearStep, ClearedRows};
pub use catalog::{CatalogError, Shape, ShapeCatalog};
pub use events::{EventSink, NullSink};
pub use game_state::{FallOutcome, GameState, Rejection};
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
