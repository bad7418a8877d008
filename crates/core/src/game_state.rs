//! Game state module - the rules state machine
//!
//! [`GameState`] owns the board, the active and preview shapes, the counters
//! and the lifecycle status. It is single-threaded and clock-free: the
//! threaded engine calls [`GameState::fall_step`] on its own schedule, tests
//! call it directly.
//!
//! Every observable change goes out through the [`EventSink`] in order.
//! Rejected player input is a silent no-op that returns `false`; misuse of the
//! lifecycle operations additionally prints a tagged diagnostic.

use thiserror::Error;

use crate::board::{Board, ClearStep};
use crate::catalog::ShapeCatalog;
use crate::events::EventSink;
use crate::rng::SimpleRng;
use crate::scoring::{fall_interval_ms, level_for_rows, line_clear_score};
use crate::snapshot::GameSnapshot;
use crate::types::{
    Command, GameEvent, GameStatus, Moving, OutOfBounds, Point, ShapeId, Transition, COL,
    FALL_INTERVALS_MS, LEVELS, ROW,
};

/// Why a move or rotation was not applied.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
    #[error("shape {0} would leave the board")]
    ShapeOutOfBounds(ShapeId),
    #[error("shape {0} conflicts with the board")]
    Conflict(ShapeId),
    #[error("game is {0}, not gaming")]
    NotPlaying(GameStatus),
}

/// Result of one automatic fall attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    /// The active shape moved down one row.
    Fell,
    /// The shape locked in and the next one spawned.
    Landed,
    /// Landing or spawning failed; the game is over.
    GameOver,
    /// Not gaming, nothing happened.
    Idle,
}

pub struct GameState<S: EventSink> {
    catalog: &'static ShapeCatalog,
    status: GameStatus,
    board: Board,
    rng: SimpleRng,
    current: ShapeId,
    next: ShapeId,
    pos: Point,
    score: u64,
    rows: u32,
    level: u8,
    fall_intervals: [u64; LEVELS],
    epoch: u64,
    events: S,
}

impl<S: EventSink> GameState<S> {
    pub fn new(catalog: &'static ShapeCatalog, rng: SimpleRng, events: S) -> Self {
        Self {
            catalog,
            status: GameStatus::Zero,
            board: Board::new(),
            rng,
            current: ShapeId::default(),
            next: ShapeId::default(),
            pos: Point::INVALID,
            score: 0,
            rows: 0,
            level: 0,
            fall_intervals: FALL_INTERVALS_MS,
            epoch: 0,
            events,
        }
    }

    /// Replace the per-level speed table.
    pub fn with_fall_intervals(mut self, table: [u64; LEVELS]) -> Self {
        self.fall_intervals = table;
        self
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

    pub fn rows_cleared(&self) -> u32 {
        self.rows
    }

    pub fn current(&self) -> ShapeId {
        self.current
    }

    pub fn next(&self) -> ShapeId {
        self.next
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access, for setting up positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Bumped by every successful `start()`.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn catalog(&self) -> &'static ShapeCatalog {
        self.catalog
    }

    /// Fall interval for the current level.
    pub fn fall_interval_ms(&self) -> u64 {
        fall_interval_ms(&self.fall_intervals, self.level)
    }

    pub fn events(&self) -> &S {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut S {
        &mut self.events
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut board = [[0; COL]; ROW];
        for (row, out) in board.iter_mut().enumerate() {
            *out = self.board.row(row);
        }
        GameSnapshot {
            board,
            status: self.status,
            current: self.current,
            next: self.next,
            position: self.pos,
            score: self.score,
            level: self.level,
            rows_cleared: self.rows,
            water_level: self.board.water_level(),
        }
    }

    /// Start a new game from ZERO or GAMEOVER.
    pub fn start(&mut self) -> bool {
        if !self.status.can_start() {
            eprintln!("[Engine] start ignored: game is {}", self.status);
            return false;
        }
        if self.status == GameStatus::GameOver {
            self.reset();
            self.set_status(GameStatus::Zero);
        }
        self.epoch = self.epoch.wrapping_add(1);

        self.current = self.catalog.random(&mut self.rng);
        self.next = self.catalog.random(&mut self.rng);
        self.pos = self.catalog.shape(self.current).spawn_point();

        let spawn = Moving::new(Point::INVALID, self.pos);
        self.notify_moving(spawn, Transition::Spawned, self.current);
        self.events.emit(GameEvent::NextPreview { shape: self.next });
        self.events.emit(GameEvent::ScoreChanged { score: self.score });
        self.events.emit(GameEvent::LevelChanged { level: self.level });
        self.set_status(GameStatus::Gaming);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Gaming {
            eprintln!("[Engine] pause ignored: game is {}", self.status);
            return false;
        }
        self.set_status(GameStatus::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            eprintln!("[Engine] resume ignored: game is {}", self.status);
            return false;
        }
        self.set_status(GameStatus::Gaming);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift_and_notify(Point::moved_left)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift_and_notify(Point::moved_right)
    }

    /// Swap in the next orientation at the same origin.
    pub fn rotate(&mut self) -> bool {
        match self.try_rotate() {
            Ok(prev) => {
                self.notify_moving(Moving::in_place(self.pos), Transition::RotatedInPlace, prev);
                true
            }
            Err(_) => false,
        }
    }

    /// Move the shape as far down as it goes, in one notification.
    ///
    /// The shape is not locked here; the next fall step lands it.
    pub fn drop_down(&mut self) -> bool {
        if self.ensure_playing().is_err() {
            return false;
        }
        let start = self.pos;
        let mut to = start;
        while let Ok(below) = self.probe(self.current, to.moved_down()) {
            to = below;
        }
        if to.same_cell(&start) {
            return false;
        }

        self.pos = Point {
            from_col: start.col,
            from_row: start.row,
            ..to
        };
        self.notify_moving(Moving::new(start, self.pos), Transition::Moved, self.current);
        true
    }

    /// One automatic fall attempt: move down, or land when blocked.
    pub fn fall_step(&mut self) -> FallOutcome {
        if self.status != GameStatus::Gaming {
            return FallOutcome::Idle;
        }
        match self.probe(self.current, self.pos.moved_down()) {
            Ok(to) => {
                let from = self.pos;
                self.pos = to;
                self.notify_moving(Moving::new(from, to), Transition::Moved, self.current);
                FallOutcome::Fell
            }
            Err(_) => self.land(),
        }
    }

    /// Dispatch a control command.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::DropDown => self.drop_down(),
        }
    }

    /// Replace the active shape without notifying, if it fits at `pos`.
    pub fn place_active(&mut self, id: ShapeId, pos: Point) -> Result<(), Rejection> {
        self.check_placement(id, pos)?;
        self.current = id;
        self.pos = pos;
        Ok(())
    }

    fn land(&mut self) -> FallOutcome {
        let shape = self.catalog.shape(self.current);
        self.board.settle(shape, self.pos);
        if self.board.conflict(shape, self.pos) {
            self.game_over();
            return FallOutcome::GameOver;
        }

        self.board.lock_in(shape, self.pos);
        self.notify_moving(Moving::in_place(self.pos), Transition::Locked, self.current);

        let top = (self.pos.row + shape.bounds().min_row).max(0) as usize;
        self.promote(top);
        self.spawn_next()
    }

    fn promote(&mut self, from_row: usize) {
        let events = &mut self.events;
        let cleared = self.board.promote(from_row, |board, step| match step {
            ClearStep::Highlight { row } => events.emit(GameEvent::HighlightRow { row }),
            ClearStep::Compacted { top, bottom } => events.emit(GameEvent::RedrawArea {
                top,
                bottom,
                rows: board.rows(top, bottom),
            }),
        });
        if !cleared.is_empty() {
            self.award(cleared.len());
        }
    }

    fn award(&mut self, rows: usize) {
        self.score += line_clear_score(rows, self.level);
        self.rows += rows as u32;
        self.events.emit(GameEvent::ScoreChanged { score: self.score });

        let level = level_for_rows(self.rows);
        if level > self.level {
            self.level = level;
            self.events.emit(GameEvent::LevelChanged { level });
        }
    }

    fn spawn_next(&mut self) -> FallOutcome {
        let prev = self.current;
        self.current = self.next;
        self.next = self.catalog.random(&mut self.rng);

        let shape = self.catalog.shape(self.current);
        self.pos = shape.spawn_point();
        if self.board.conflict(shape, self.pos) {
            self.game_over();
            return FallOutcome::GameOver;
        }

        self.notify_moving(Moving::new(Point::INVALID, self.pos), Transition::Spawned, prev);
        self.events.emit(GameEvent::NextPreview { shape: self.next });
        FallOutcome::Landed
    }

    fn game_over(&mut self) {
        eprintln!(
            "[Engine] game over: score={} rows={} level={}",
            self.score, self.rows, self.level
        );
        self.set_status(GameStatus::GameOver);
    }

    fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.rows = 0;
        self.level = 0;
        self.pos = Point::INVALID;
    }

    fn set_status(&mut self, status: GameStatus) {
        self.status = status;
        self.events.emit(GameEvent::StateChanged(status));
    }

    fn notify_moving(&mut self, moving: Moving, transition: Transition, prev_shape: ShapeId) {
        self.events.emit(GameEvent::Moving {
            moving,
            transition,
            prev_shape,
            shape: self.current,
        });
    }

    fn ensure_playing(&self) -> Result<(), Rejection> {
        match self.status {
            GameStatus::Gaming => Ok(()),
            other => Err(Rejection::NotPlaying(other)),
        }
    }

    fn check_placement(&self, id: ShapeId, pos: Point) -> Result<(), Rejection> {
        let shape = self.catalog.shape(id);
        if shape.area(pos).out_of_bounds() {
            return Err(Rejection::ShapeOutOfBounds(id));
        }
        if self.board.conflict(shape, pos) {
            return Err(Rejection::Conflict(id));
        }
        Ok(())
    }

    fn probe(&self, id: ShapeId, to: Result<Point, OutOfBounds>) -> Result<Point, Rejection> {
        let to = to?;
        self.check_placement(id, to)?;
        Ok(to)
    }

    fn try_shift(
        &mut self,
        shift: fn(Point) -> Result<Point, OutOfBounds>,
    ) -> Result<Moving, Rejection> {
        self.ensure_playing()?;
        let to = self.probe(self.current, shift(self.pos))?;
        let moving = Moving::new(self.pos, to);
        self.pos = to;
        Ok(moving)
    }

    fn shift_and_notify(&mut self, shift: fn(Point) -> Result<Point, OutOfBounds>) -> bool {
        match self.try_shift(shift) {
            Ok(moving) => {
                self.notify_moving(moving, Transition::Moved, self.current);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns the shape that was active before the rotation.
    fn try_rotate(&mut self) -> Result<ShapeId, Rejection> {
        self.ensure_playing()?;
        let prev = self.current;
        let next = self.catalog.rotated(prev);
        if next == prev {
            // single-orientation class, nothing to change
            return Err(Rejection::Conflict(prev));
        }
        self.check_placement(next, self.pos)?;
        self.current = next;
        Ok(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::types::{LEVEL_BONUS, SCORE_TABLE};

    fn new_game(seed: u32) -> GameState<Vec<GameEvent>> {
        let catalog = catalog::init().unwrap();
        GameState::new(catalog, SimpleRng::new(seed), Vec::new())
    }

    fn started(seed: u32) -> GameState<Vec<GameEvent>> {
        let mut game = new_game(seed);
        assert!(game.start());
        game.events_mut().clear();
        game
    }

    fn fill_row(game: &mut GameState<Vec<GameEvent>>, row: i32, skip: &[i32]) {
        for col in 0..COL as i32 {
            if !skip.contains(&col) {
                game.board_mut().set(col, row, 9);
            }
        }
    }

    #[test]
    fn test_start_emits_initial_sequence() {
        let mut game = new_game(7);
        assert!(game.start());
        assert_eq!(game.status(), GameStatus::Gaming);

        let events = game.events();
        let kinds: Vec<_> = events.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec!["moving", "nextPreview", "scoreChanged", "levelChanged", "stateChanged"]
        );
        match &events[0] {
            GameEvent::Moving {
                moving, transition, ..
            } => {
                assert_eq!(*transition, Transition::Spawned);
                assert!(!moving.from.is_valid());
                assert_eq!(moving.to, game.position());
            }
            other => panic!("unexpected first event {other:?}"),
        }
        assert_eq!(events[2], GameEvent::ScoreChanged { score: 0 });
        assert_eq!(events[3], GameEvent::LevelChanged { level: 0 });
    }

    #[test]
    fn test_spawn_puts_top_row_on_board_row_zero() {
        let game = started(42);
        let shape = game.catalog().shape(game.current());
        let area = shape.area(game.position());
        assert_eq!(area.min_row, 0);
        assert!(!area.out_of_bounds());
    }

    #[test]
    fn test_start_rejected_while_gaming() {
        let mut game = started(1);
        assert!(!game.start());
        assert!(game.events().is_empty());
        let epoch = game.epoch();
        assert!(game.pause());
        assert!(!game.start());
        assert_eq!(game.epoch(), epoch);
    }

    #[test]
    fn test_pause_resume_transitions() {
        let mut game = new_game(1);
        assert!(!game.pause());
        assert!(!game.resume());
        assert!(game.start());
        assert!(!game.resume());
        assert!(game.pause());
        assert_eq!(game.status(), GameStatus::Paused);
        assert_eq!(game.fall_step(), FallOutcome::Idle);
        assert!(game.apply(Command::TogglePause));
        assert_eq!(game.status(), GameStatus::Gaming);
    }

    #[test]
    fn test_player_input_ignored_outside_gaming() {
        let mut game = new_game(3);
        assert!(!game.move_left());
        assert!(!game.move_right());
        assert!(!game.rotate());
        assert!(!game.drop_down());
        assert!(game.events().is_empty());

        assert!(game.start());
        assert!(game.pause());
        game.events_mut().clear();
        assert!(!game.apply(Command::MoveLeft));
        assert!(!game.apply(Command::DropDown));
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_single_cell_moves_left_spawn_column_times() {
        let mut game = started(5);
        let single = ShapeId(0);
        let spawn = game.catalog().shape(single).spawn_point();
        game.place_active(single, spawn).unwrap();

        let spawn_col = spawn.col + game.catalog().bounds(single).min_col;
        for _ in 0..spawn_col {
            assert!(game.move_left());
        }
        let emitted = game.events().len();
        assert_eq!(emitted, spawn_col as usize);

        assert!(!game.move_left());
        assert_eq!(game.events().len(), emitted);
    }

    #[test]
    fn test_move_rejected_by_conflict() {
        let mut game = started(5);
        game.place_active(ShapeId(0), Point::at(4, 5)).unwrap();
        game.board_mut().set(6, 5, 1);
        assert!(!game.move_right());
        assert!(game.move_left());
        assert!(game.events().len() == 1);
    }

    #[test]
    fn test_rotate_against_right_wall_is_rejected() {
        let mut game = started(11);
        // Vertical bar hugging the right wall; its successor is horizontal.
        game.place_active(ShapeId(16), Point::at(COL as i32 - 2, 5)).unwrap();
        assert!(!game.rotate());
        assert!(game.events().is_empty());
        assert_eq!(game.current(), ShapeId(16));
    }

    #[test]
    fn test_rotate_in_place_carries_previous_shape() {
        let mut game = started(11);
        game.place_active(ShapeId(15), Point::at(3, 5)).unwrap();
        assert!(game.rotate());
        assert_eq!(game.current(), ShapeId(16));
        match &game.events()[0] {
            GameEvent::Moving {
                moving,
                transition,
                prev_shape,
                shape,
            } => {
                assert_eq!(*transition, Transition::RotatedInPlace);
                assert!(moving.is_in_place());
                assert_eq!(*prev_shape, ShapeId(15));
                assert_eq!(*shape, ShapeId(16));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_drop_down_single_notification() {
        let mut game = started(2);
        game.place_active(ShapeId(0), Point::at(4, 0)).unwrap();
        assert!(game.drop_down());
        assert_eq!(game.events().len(), 1);
        match &game.events()[0] {
            GameEvent::Moving { moving, .. } => {
                assert_eq!((moving.from.col, moving.from.row), (4, 0));
                assert_eq!((moving.to.col, moving.to.row), (4, ROW as i32 - 1));
            }
            other => panic!("unexpected event {other:?}"),
        }
        // Already at the bottom.
        assert!(!game.drop_down());
        assert_eq!(game.fall_step(), FallOutcome::Landed);
    }

    #[test]
    fn test_filling_gap_clears_one_row() {
        let mut game = started(9);
        fill_row(&mut game, ROW as i32 - 1, &[5]);
        game.place_active(ShapeId(0), Point::at(4, ROW as i32 - 2)).unwrap();

        assert_eq!(game.fall_step(), FallOutcome::Fell);
        assert_eq!(game.fall_step(), FallOutcome::Landed);

        let events = game.events();
        let highlights = events
            .iter()
            .filter(|e| matches!(e, GameEvent::HighlightRow { .. }))
            .count();
        let redraws: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::RedrawArea { top, bottom, rows } => Some((*top, *bottom, rows.len())),
                _ => None,
            })
            .collect();
        assert_eq!(highlights, 1);
        assert_eq!(redraws, vec![(ROW - 1, ROW - 1, 1)]);
        assert!(events.contains(&GameEvent::ScoreChanged {
            score: SCORE_TABLE[0]
        }));
        assert_eq!(game.score(), SCORE_TABLE[0]);
        assert_eq!(game.rows_cleared(), 1);
        assert_eq!(game.board().occupied_count(), 0);
    }

    #[test]
    fn test_lock_then_spawn_order() {
        let mut game = started(9);
        game.place_active(ShapeId(0), Point::at(4, ROW as i32 - 1)).unwrap();
        assert_eq!(game.fall_step(), FallOutcome::Landed);

        let kinds: Vec<_> = game
            .events()
            .iter()
            .map(|e| match e {
                GameEvent::Moving { transition, .. } => transition.as_str(),
                other => other.kind(),
            })
            .collect();
        assert_eq!(kinds, vec!["locked", "spawned", "nextPreview"]);
        assert!(game.board().is_occupied(5, ROW as i32 - 1));
    }

    #[test]
    fn test_landing_conflict_ends_game() {
        let mut game = started(4);
        for row in 0..ROW as i32 {
            fill_row(&mut game, row, &[0]);
        }
        assert_eq!(game.fall_step(), FallOutcome::GameOver);
        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(
            game.events().last(),
            Some(&GameEvent::StateChanged(GameStatus::GameOver))
        );
        assert_eq!(game.fall_step(), FallOutcome::Idle);
    }

    #[test]
    fn test_spawn_conflict_ends_game() {
        let mut game = started(4);
        fill_row(&mut game, 0, &[0, 5]);
        for row in 1..ROW as i32 {
            fill_row(&mut game, row, &[0]);
        }
        game.place_active(ShapeId(0), Point::at(4, 0)).unwrap();

        assert_eq!(game.fall_step(), FallOutcome::GameOver);
        let locked = game.events().iter().any(|e| {
            matches!(
                e,
                GameEvent::Moving {
                    transition: Transition::Locked,
                    ..
                }
            )
        });
        assert!(locked);
        assert_eq!(game.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_restart_after_game_over_resets() {
        let mut game = started(4);
        for row in 0..ROW as i32 {
            fill_row(&mut game, row, &[0]);
        }
        assert_eq!(game.fall_step(), FallOutcome::GameOver);
        let epoch = game.epoch();
        game.events_mut().clear();

        assert!(game.start());
        assert_eq!(game.epoch(), epoch + 1);
        assert_eq!(game.board().occupied_count(), 0);
        assert_eq!(game.score(), 0);

        let events = game.events();
        assert_eq!(events[0], GameEvent::StateChanged(GameStatus::Zero));
        assert_eq!(
            events.last(),
            Some(&GameEvent::StateChanged(GameStatus::Gaming))
        );
    }

    #[test]
    fn test_level_up_after_board_height_rows() {
        let mut game = started(21);
        for _ in 0..ROW {
            fill_row(&mut game, ROW as i32 - 1, &[5]);
            game.place_active(ShapeId(0), Point::at(4, ROW as i32 - 1)).unwrap();
            assert_eq!(game.fall_step(), FallOutcome::Landed);
        }
        assert_eq!(game.rows_cleared(), ROW as u32);
        assert_eq!(game.level(), 1);
        assert!(game
            .events()
            .contains(&GameEvent::LevelChanged { level: 1 }));
        assert_eq!(game.fall_interval_ms(), FALL_INTERVALS_MS[1]);
        // 19 single clears at level 0.
        assert_eq!(game.score(), SCORE_TABLE[0] * ROW as u64);
    }

    #[test]
    fn test_level_bonus_applies_after_level_up() {
        let mut game = started(21);
        for _ in 0..ROW {
            fill_row(&mut game, ROW as i32 - 1, &[5]);
            game.place_active(ShapeId(0), Point::at(4, ROW as i32 - 1)).unwrap();
            assert_eq!(game.fall_step(), FallOutcome::Landed);
        }
        assert_eq!(game.level(), 1);
        let before = game.score();

        fill_row(&mut game, ROW as i32 - 1, &[5]);
        game.place_active(ShapeId(0), Point::at(4, ROW as i32 - 1)).unwrap();
        assert_eq!(game.fall_step(), FallOutcome::Landed);

        assert_eq!(game.score() - before, SCORE_TABLE[0] + LEVEL_BONUS);
        assert_eq!(game.score(), 2100);
    }

    #[test]
    fn test_double_clear_scores_once() {
        let mut game = started(9);
        fill_row(&mut game, ROW as i32 - 2, &[5]);
        fill_row(&mut game, ROW as i32 - 1, &[5]);
        // Vertical domino covering (5, 17) and (5, 18).
        game.place_active(ShapeId(2), Point::at(4, ROW as i32 - 2)).unwrap();
        assert_eq!(game.fall_step(), FallOutcome::Landed);

        let events = game.events();
        let scores: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ScoreChanged { .. }))
            .collect();
        let highlights = events
            .iter()
            .filter(|e| matches!(e, GameEvent::HighlightRow { .. }))
            .count();
        let redraws = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RedrawArea { .. }))
            .count();
        assert_eq!(scores, vec![&GameEvent::ScoreChanged { score: 300 }]);
        assert_eq!(highlights, 2);
        assert_eq!(redraws, 2);
        assert_eq!(game.rows_cleared(), 2);
        assert_eq!(game.board().occupied_count(), 0);
    }

    #[test]
    fn test_snapshot_copies_state() {
        let mut game = started(8);
        game.board_mut().set(2, 18, 4);
        let snap = game.snapshot();
        assert_eq!(snap.status, GameStatus::Gaming);
        assert_eq!(snap.board[18][2], 4);
        assert_eq!(snap.occupied_count(), 1);
        assert_eq!(snap.current, game.current());
        assert_eq!(snap.position, game.position());
        assert_eq!(snap.water_level, 18);
    }

    #[test]
    fn test_custom_fall_intervals() {
        let catalog = catalog::init().unwrap();
        let game = GameState::new(catalog, SimpleRng::new(1), Vec::new())
            .with_fall_intervals([60, 50, 40, 30, 20, 10]);
        assert_eq!(game.fall_interval_ms(), 60);
    }
}
