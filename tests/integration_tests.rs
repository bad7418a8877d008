//! Whole games driven single-threaded, with the terminal view replaying the
//! event stream alongside.

use blockfall::core::{catalog, FallOutcome, GameState, SimpleRng};
use blockfall::term::BoardView;
use blockfall::types::{Command, GameEvent, GameStatus, Transition, COL, ROW};
use blockfall::EventLog;

fn new_game(seed: u32) -> GameState<Vec<GameEvent>> {
    GameState::new(catalog::init().unwrap(), SimpleRng::new(seed), Vec::new())
}

fn assert_mirrors(view: &BoardView, game: &GameState<Vec<GameEvent>>) {
    let snap = game.snapshot();
    for row in 0..ROW {
        for col in 0..COL {
            assert_eq!(
                view.cell(col, row),
                snap.board[row][col],
                "cell ({col}, {row}) differs"
            );
        }
    }
    assert_eq!(view.score(), snap.score);
    assert_eq!(view.level(), snap.level);
    assert_eq!(view.status(), snap.status);
    if snap.status == GameStatus::Gaming {
        let (shape, at) = view.active().expect("active shape");
        assert_eq!(shape, snap.current);
        assert!(at.same_cell(&snap.position));
        assert_eq!(view.next(), Some(snap.next));
    }
}

#[test]
fn test_view_mirrors_engine_through_whole_game() {
    let shapes = catalog::init().unwrap();
    let mut game = new_game(2024);
    let mut view = BoardView::new(shapes);
    let script = [
        Command::MoveLeft,
        Command::Rotate,
        Command::MoveRight,
        Command::MoveRight,
        Command::Rotate,
        Command::MoveLeft,
    ];

    assert!(game.start());
    let mut steps = 0;
    loop {
        let command = script[steps % script.len()];
        game.apply(command);
        if steps % 3 == 0 {
            game.drop_down();
        }
        let outcome = game.fall_step();

        for event in game.events_mut().drain(..) {
            view.apply(&event);
        }
        assert_mirrors(&view, &game);

        steps += 1;
        if outcome == FallOutcome::GameOver || steps > 20_000 {
            break;
        }
    }
    assert_eq!(game.status(), GameStatus::GameOver);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut game = new_game(seed);
        game.start();
        for _ in 0..300 {
            game.drop_down();
            if game.fall_step() == FallOutcome::GameOver {
                break;
            }
        }
        game.events().clone()
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn test_every_lock_is_followed_by_spawn_or_game_over() {
    let mut game = new_game(31);
    game.start();
    for _ in 0..2_000 {
        game.drop_down();
        if game.fall_step() == FallOutcome::GameOver {
            break;
        }
    }

    let events = game.events();
    for (i, event) in events.iter().enumerate() {
        if let GameEvent::Moving {
            transition: Transition::Locked,
            ..
        } = event
        {
            let follow = events[i + 1..].iter().find(|e| {
                matches!(
                    e,
                    GameEvent::Moving {
                        transition: Transition::Spawned,
                        ..
                    } | GameEvent::StateChanged(GameStatus::GameOver)
                )
            });
            assert!(follow.is_some(), "lock at {i} left dangling");
        }
    }
}

#[test]
fn test_event_log_records_a_game() {
    let mut game = new_game(8);
    game.start();
    for _ in 0..50 {
        game.fall_step();
    }

    let mut log = EventLog::new(Vec::new());
    for event in game.events() {
        log.record(event).unwrap();
    }
    assert_eq!(log.len() as usize, game.events().len());

    let text = String::from_utf8(log.into_inner()).unwrap();
    let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(first["type"], "moving");
    assert_eq!(first["transition"], "spawned");
}
