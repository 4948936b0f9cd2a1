#![no_main]

//! Session move-sequence fuzzer.
//!
//! Starts from an arbitrary grid (or a fresh seeded game) and applies an
//! arbitrary sequence of moves, checking session invariants after each one:
//! 1. Values stay 0 or powers of two
//! 2. No-op moves change nothing
//! 3. Score only grows, by the merge total of each move
//! 4. game_over matches the terminal check

use arbitrary::Arbitrary;
use grid2048::game::check_invariants;
use grid2048::{Direction, Grid, Session};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzDirection {
    Up,
    Down,
    Left,
    Right,
}

impl From<FuzzDirection> for Direction {
    fn from(d: FuzzDirection) -> Self {
        match d {
            FuzzDirection::Up => Direction::Up,
            FuzzDirection::Down => Direction::Down,
            FuzzDirection::Left => Direction::Left,
            FuzzDirection::Right => Direction::Right,
        }
    }
}

#[derive(Arbitrary, Debug)]
struct MovesInput {
    seed: u64,
    /// Tile exponents (0 = empty); used when `from_grid` is set.
    exponents: [[u8; 4]; 4],
    from_grid: bool,
    moves: Vec<FuzzDirection>,
}

fuzz_target!(|input: MovesInput| {
    let rng = StdRng::seed_from_u64(input.seed);
    let mut session = if input.from_grid {
        let values = input
            .exponents
            .map(|row| row.map(|e| if e % 32 == 0 { 0 } else { 1u32 << (e % 32) }));
        let Ok(grid) = Grid::from_values(values) else {
            return;
        };
        Session::with_grid(grid, rng)
    } else {
        Session::new_game(rng)
    };

    let violations = check_invariants(&session);
    assert!(violations.is_empty(), "Invariants violated at start: {violations:?}");

    for (turn, &fuzz_direction) in input.moves.iter().take(2000).enumerate() {
        let direction = Direction::from(fuzz_direction);
        let before = *session.grid();
        let score_before = session.score();
        let expected = before.slide(direction);

        let result = session.apply_move(direction);

        if result.moved {
            assert_eq!(session.score(), score_before + expected.score_delta);
            assert_eq!(session.is_game_over(), session.grid().is_terminal());
        } else {
            assert_eq!(*session.grid(), before, "no-op move changed the grid");
            assert_eq!(session.score(), score_before);
        }

        let violations = check_invariants(&session);
        assert!(
            violations.is_empty(),
            "Invariants violated after move {turn}: {violations:?}"
        );
    }
});
