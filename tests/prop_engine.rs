//! Property-based tests for the slide/merge engine.
//!
//! Run with: cargo test --release prop_engine

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use grid2048::game::{Values, check_grid, check_invariants, is_valid_value};
use grid2048::{Direction, Grid, Session};

/// Grids with tiles up to 2048, about a third of the cells empty.
fn values_strategy() -> impl Strategy<Value = Values> {
    let cell = prop_oneof![
        1 => Just(0u32),
        2 => (1u32..=11).prop_map(|exp| 1 << exp),
    ];
    prop::array::uniform4(prop::array::uniform4(cell))
}

/// Grids whose tiles are all distinct, so no slide can merge.
fn distinct_values_strategy() -> impl Strategy<Value = Values> {
    (
        Just((1u32..=16).collect::<Vec<_>>()).prop_shuffle(),
        prop::array::uniform16(any::<bool>()),
    )
        .prop_map(|(exps, occupied)| {
            let mut values = [[0u32; 4]; 4];
            for (i, (exp, keep)) in exps.into_iter().zip(occupied).enumerate() {
                if keep {
                    values[i / 4][i % 4] = 1 << exp;
                }
            }
            values
        })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn tile_sum(values: &Values) -> u64 {
    values.iter().flatten().map(|&v| u64::from(v)).sum()
}

fn tile_count(values: &Values) -> usize {
    values.iter().flatten().filter(|&&v| v != 0).count()
}

fn sorted_tiles(values: &Values) -> Vec<u32> {
    let mut tiles: Vec<u32> = values.iter().flatten().copied().filter(|&v| v != 0).collect();
    tiles.sort_unstable();
    tiles
}

fn mirror(values: &Values) -> Values {
    let mut out = *values;
    for row in &mut out {
        row.reverse();
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Every value after a slide is 0 or a power of two.
    #[test]
    fn prop_slide_keeps_valid_values(values in values_strategy(), direction in direction_strategy()) {
        let grid = Grid::from_values(values).unwrap();
        let outcome = grid.slide(direction);
        for value in outcome.grid.values().iter().flatten() {
            prop_assert!(is_valid_value(*value));
        }
        prop_assert!(check_grid(&outcome.grid).is_empty());
    }

    /// Merging preserves the sum of all tiles.
    #[test]
    fn prop_slide_conserves_tile_sum(values in values_strategy(), direction in direction_strategy()) {
        let grid = Grid::from_values(values).unwrap();
        let outcome = grid.slide(direction);
        prop_assert_eq!(tile_sum(&outcome.grid.values()), tile_sum(&values));
    }

    /// Without merges a slide only moves tiles: the values are the same multiset.
    #[test]
    fn prop_slide_without_merge_keeps_values(values in values_strategy(), direction in direction_strategy()) {
        let grid = Grid::from_values(values).unwrap();
        let outcome = grid.slide(direction);
        if outcome.grid.iter().all(|(_, cell)| !cell.merged) {
            prop_assert_eq!(sorted_tiles(&outcome.grid.values()), sorted_tiles(&values));
            prop_assert_eq!(outcome.score_delta, 0);
        }
    }

    /// Distinct tiles only ever move, never merge.
    #[test]
    fn prop_distinct_tiles_are_conserved(values in distinct_values_strategy(), direction in direction_strategy()) {
        let outcome = Grid::from_values(values).unwrap().slide(direction);
        prop_assert!(outcome.grid.iter().all(|(_, cell)| !cell.merged));
        prop_assert_eq!(sorted_tiles(&outcome.grid.values()), sorted_tiles(&values));
        prop_assert_eq!(tile_count(&outcome.grid.values()), tile_count(&values));
        prop_assert_eq!(outcome.score_delta, 0);
    }

    /// Each merge removes one tile, and the score equals the merged values.
    #[test]
    fn prop_merge_arithmetic(values in values_strategy(), direction in direction_strategy()) {
        let grid = Grid::from_values(values).unwrap();
        let outcome = grid.slide(direction);

        let merged: Vec<u32> = outcome
            .grid
            .iter()
            .filter(|(_, cell)| cell.merged)
            .map(|(_, cell)| cell.value)
            .collect();

        prop_assert_eq!(tile_count(&values) - tile_count(&outcome.grid.values()), merged.len());
        prop_assert_eq!(outcome.score_delta, merged.iter().map(|&v| u64::from(v)).sum::<u64>());
        prop_assert_eq!(outcome.score_delta % 2, 0);
    }

    /// `moved` is reported exactly when the grid changes.
    #[test]
    fn prop_moved_iff_changed(values in values_strategy(), direction in direction_strategy()) {
        let grid = Grid::from_values(values).unwrap();
        let outcome = grid.slide(direction);
        prop_assert_eq!(outcome.moved, outcome.grid.values() != values);
        if !outcome.moved {
            prop_assert_eq!(outcome.score_delta, 0);
        }
    }

    /// Sliding right is sliding left on the mirrored grid.
    #[test]
    fn prop_right_mirrors_left(values in values_strategy()) {
        let right = Grid::from_values(values).unwrap().slide(Direction::Right);
        let left = Grid::from_values(mirror(&values)).unwrap().slide(Direction::Left);
        prop_assert_eq!(right.grid.values(), mirror(&left.grid.values()));
        prop_assert_eq!(right.score_delta, left.score_delta);
    }

    /// A grid is terminal exactly when no direction changes it.
    #[test]
    fn prop_terminal_iff_no_legal_move(values in values_strategy()) {
        let grid = Grid::from_values(values).unwrap();
        let any_moves = Direction::ALL.iter().any(|&d| grid.slide(d).moved);
        prop_assert_eq!(grid.is_terminal(), !any_moves);
        prop_assert_eq!(grid.legal_moves().is_empty(), !any_moves);
    }

    /// A session move either changes nothing or slides and spawns one tile.
    #[test]
    fn prop_session_move(values in values_strategy(), direction in direction_strategy(), seed in any::<u64>()) {
        let grid = Grid::from_values(values).unwrap();
        let mut session = Session::with_grid(grid, StdRng::seed_from_u64(seed));
        let before = session.grid().values();
        let slide = grid.slide(direction);

        let result = session.apply_move(direction);

        prop_assert_eq!(result.moved, slide.moved);
        prop_assert_eq!(result.score_delta, slide.score_delta);
        prop_assert_eq!(session.score(), slide.score_delta);
        if result.moved {
            let spawn = result.spawned.unwrap();
            prop_assert_eq!(slide.grid.values()[spawn.row][spawn.col], 0);
            prop_assert!(spawn.value == 2 || spawn.value == 4);
            prop_assert_eq!(session.grid().count_empty(), slide.grid.count_empty() - 1);
            prop_assert_eq!(result.game_over, session.grid().is_terminal());
        } else {
            prop_assert_eq!(session.grid().values(), before);
            prop_assert!(result.spawned.is_none());
        }
        prop_assert!(check_invariants(&session).is_empty());
    }
}
