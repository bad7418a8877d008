//! Property tests for the board and scoring rules.

use proptest::prelude::*;

use blockfall::core::scoring::{level_for_rows, line_clear_score};
use blockfall::core::{catalog, Board};
use blockfall::types::{Point, ShapeId, COL, LEVELS, ROW, SCORE_TABLE, SHAPE_SIZE};

fn board_from(rows: &[[bool; COL]; ROW]) -> Board {
    let mut board = Board::new();
    for (row, cells) in rows.iter().enumerate() {
        for (col, &filled) in cells.iter().enumerate() {
            if filled {
                board.set(col as i32, row as i32, 1);
            }
        }
    }
    board
}

fn row_strategy() -> impl Strategy<Value = [bool; COL]> {
    prop_oneof![
        Just([true; COL]),
        prop::array::uniform11(any::<bool>()),
    ]
}

fn board_strategy() -> impl Strategy<Value = [[bool; COL]; ROW]> {
    prop::array::uniform19(row_strategy())
}

proptest! {
    #[test]
    fn conflict_matches_cell_by_cell_scan(
        rows in board_strategy(),
        id in 0u8..54,
        col in -3i32..COL as i32,
        row in -3i32..ROW as i32,
    ) {
        let shapes = catalog::init().unwrap();
        let shape = shapes.shape(ShapeId(id));
        let board = board_from(&rows);
        let pos = Point::at(col, row);

        let mut expected = false;
        for r in 0..SHAPE_SIZE as i32 {
            for c in 0..SHAPE_SIZE as i32 {
                if shape.cell(c, r) == 0 {
                    continue;
                }
                match board.get(col + c, row + r) {
                    Some(0) => {}
                    _ => expected = true,
                }
            }
        }
        prop_assert_eq!(board.conflict(shape, pos), expected);
    }

    #[test]
    fn empty_board_never_conflicts_in_bounds(id in 0u8..54, col in -3i32..COL as i32, row in -3i32..ROW as i32) {
        let shapes = catalog::init().unwrap();
        let shape = shapes.shape(ShapeId(id));
        let pos = Point::at(col, row);
        prop_assume!(!shape.area(pos).out_of_bounds());
        prop_assert!(!Board::new().conflict(shape, pos));
    }

    #[test]
    fn promote_removes_full_rows_and_keeps_order(rows in board_strategy()) {
        let mut board = board_from(&rows);
        let full = rows.iter().filter(|r| r.iter().all(|&c| c)).count();
        let survivors: Vec<[bool; COL]> = rows
            .iter()
            .filter(|r| !r.iter().all(|&c| c))
            .copied()
            .collect();

        let cleared = board.promote(0, |_, _| {});
        prop_assert_eq!(cleared.len(), full);

        // Survivors sit at the bottom, in their original order.
        for row in 0..ROW {
            let expected = if row < full {
                [false; COL]
            } else {
                survivors[row - full]
            };
            let actual: Vec<bool> = board.row(row).iter().map(|&c| c > 0).collect();
            prop_assert_eq!(actual, expected.to_vec());
        }
    }

    #[test]
    fn score_formula_and_monotonic_total(clears in prop::collection::vec((0usize..=4, 0u8..LEVELS as u8), 0..50)) {
        let mut total = 0u64;
        for (n, level) in clears {
            let points = line_clear_score(n, level);
            if n > 0 {
                prop_assert_eq!(points, SCORE_TABLE[n - 1] + 100 * level as u64);
            }
            let before = total;
            total += points;
            prop_assert!(total >= before);
        }
    }

    #[test]
    fn level_is_monotone_and_capped(a in 0u32..1_000, b in 0u32..1_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_for_rows(lo) <= level_for_rows(hi));
        prop_assert!((level_for_rows(hi) as usize) < LEVELS);
        prop_assert_eq!(level_for_rows(lo) as usize, (lo as usize / ROW).min(LEVELS - 1));
    }

    #[test]
    fn rotation_cycles_return_home(id in 0u8..54) {
        let shapes = catalog::init().unwrap();
        let start = ShapeId(id);
        let n = shapes.rotation_cycle_len(start);
        prop_assert!(matches!(n, 1 | 2 | 4));
        let mut cur = start;
        for _ in 0..n {
            cur = shapes.rotated(cur);
        }
        prop_assert_eq!(cur, start);
    }
}
