//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain values with no I/O, making them usable in any context
//! (core rules, the threaded engine, terminal rendering, the event log).
//!
//! # Board Dimensions
//!
//! - **Width**: 11 columns (indexed 0-10)
//! - **Height**: 19 rows (indexed 0-18, row 0 at the top)
//! - **Shape grid**: every piece lives in a 4x4 local grid
//!
//! # Timing
//!
//! | Level | Fall interval |
//! |-------|---------------|
//! | 0 | 1500ms |
//! | 1 | 1300ms |
//! | 2 | 1000ms |
//! | 3 | 800ms |
//! | 4 | 500ms |
//! | 5 | 300ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, GameStatus, COL, ROW};
//!
//! assert_eq!(COL, 11);
//! assert_eq!(ROW, 19);
//!
//! assert!(GameStatus::Zero.can_start());
//! assert!(GameStatus::GameOver.can_start());
//! assert!(!GameStatus::Paused.can_start());
//!
//! assert_eq!(Command::from_str("dropDown"), Some(Command::DropDown));
//! ```

pub mod geometry;

pub use geometry::{cell_out_of_bounds, Area, Moving, OutOfBounds, Point};

/// Board height in rows.
pub const ROW: usize = 19;

/// Board width in columns.
pub const COL: usize = 11;

/// Side of the square local grid every shape is drawn in.
pub const SHAPE_SIZE: usize = 4;

/// Number of levels (0-based, so the highest level is `LEVELS - 1`).
pub const LEVELS: usize = 6;

/// Points for clearing 1, 2, 3 or 4 rows in one lock-in.
pub const SCORE_TABLE: [u64; SHAPE_SIZE] = [100, 300, 500, 700];

/// Extra points per level added to every scoring lock-in.
pub const LEVEL_BONUS: u64 = 100;

/// Fall interval per level in milliseconds (strictly decreasing).
pub const FALL_INTERVALS_MS: [u64; LEVELS] = [1500, 1300, 1000, 800, 500, 300];

/// Delay between `start()` and the first automatic fall step.
pub const START_DELAY_MS: u64 = 1000;

/// A board or shape cell: 0 is empty, anything else is filled.
pub type Cell = u8;

/// One full board row.
pub type Row = [Cell; COL];

/// Identity of a shape rotation class in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ShapeId(pub u8);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a game.
///
/// The declaration order is meaningful: `start()` is legal for every state
/// that orders at or below [`GameStatus::GameOver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameStatus {
    Zero,
    GameOver,
    Gaming,
    Paused,
}

impl GameStatus {
    /// Whether `start()` may be invoked from this state.
    pub fn can_start(self) -> bool {
        self <= GameStatus::GameOver
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Zero => "zero",
            GameStatus::GameOver => "gameOver",
            GameStatus::Gaming => "gaming",
            GameStatus::Paused => "paused",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Control commands accepted by the engine.
///
/// The boundary maps key presses or buttons onto these; none of them carries
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Pause,
    Resume,
    /// Pause while playing, resume while paused.
    TogglePause,
    MoveLeft,
    MoveRight,
    Rotate,
    DropDown,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "togglepause" => Some(Command::TogglePause),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "dropdown" => Some(Command::DropDown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::TogglePause => "togglePause",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::DropDown => "dropDown",
        }
    }

    /// Player input (as opposed to lifecycle control).
    pub fn is_player_input(&self) -> bool {
        matches!(
            self,
            Command::MoveLeft | Command::MoveRight | Command::Rotate | Command::DropDown
        )
    }
}

/// What a [`GameEvent::Moving`] notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// A new active shape appeared at its spawn position (`from` is invalid).
    Spawned,
    /// The active shape changed position.
    Moved,
    /// The active shape changed orientation; `from == to`.
    RotatedInPlace,
    /// The active shape was frozen into the board at `to`.
    Locked,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Spawned => "spawned",
            Transition::Moved => "moved",
            Transition::RotatedInPlace => "rotatedInPlace",
            Transition::Locked => "locked",
        }
    }
}

/// Notification emitted by the engine for every observable state change.
///
/// Events are delivered in order on a single stream. Consumers never read
/// engine fields directly; everything needed to draw the game travels here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Moving {
        moving: Moving,
        transition: Transition,
        /// Shape occupying `from` before the change (differs from `shape`
        /// only for [`Transition::RotatedInPlace`] and spawns).
        prev_shape: ShapeId,
        shape: ShapeId,
    },
    NextPreview {
        shape: ShapeId,
    },
    StateChanged(GameStatus),
    LevelChanged {
        level: u8,
    },
    ScoreChanged {
        score: u64,
    },
    /// Board rows `top..=bottom` changed wholesale; `rows` holds their
    /// contents top to bottom.
    RedrawArea {
        top: usize,
        bottom: usize,
        rows: Vec<Row>,
    },
    HighlightRow {
        row: usize,
    },
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Moving { .. } => "moving",
            GameEvent::NextPreview { .. } => "nextPreview",
            GameEvent::StateChanged(_) => "stateChanged",
            GameEvent::LevelChanged { .. } => "levelChanged",
            GameEvent::ScoreChanged { .. } => "scoreChanged",
            GameEvent::RedrawArea { .. } => "redrawArea",
            GameEvent::HighlightRow { .. } => "highlightRow",
        }
    }
}
