#![no_main]

//! Single-line compaction fuzzer.
//!
//! Feeds arbitrary lines to `compact_and_merge_row` and checks the
//! conservation rules that every direction relies on.

use arbitrary::Arbitrary;
use grid2048::game::{Cell, compact_and_merge_row, is_valid_value};
use grid2048::TileId;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct LineInput {
    exponents: [u8; 4],
}

fuzz_target!(|input: LineInput| {
    let mut line = [Cell::EMPTY; 4];
    for (i, &e) in input.exponents.iter().enumerate() {
        let exp = e % 32;
        if exp != 0 {
            line[i] = Cell::tile(1 << exp, TileId(i as u64 + 1));
        }
    }

    let outcome = compact_and_merge_row(line);

    let sum_before: u64 = line.iter().map(|c| u64::from(c.value)).sum();
    let sum_after: u64 = outcome.cells.iter().map(|c| u64::from(c.value)).sum();
    assert_eq!(sum_before, sum_after, "tile sum not conserved");

    let merged: u64 = outcome
        .cells
        .iter()
        .filter(|c| c.merged)
        .map(|c| u64::from(c.value))
        .sum();
    assert_eq!(outcome.score, merged, "score differs from merged total");

    // Occupied cells are packed toward index 0.
    let occupied = outcome.cells.iter().take_while(|c| !c.is_empty()).count();
    assert!(outcome.cells[occupied..].iter().all(Cell::is_empty));
    assert!(outcome.cells.iter().all(|c| is_valid_value(c.value)));

    // Each merge removes exactly one tile.
    let before = line.iter().filter(|c| !c.is_empty()).count();
    let merges = outcome.cells.iter().filter(|c| c.merged).count();
    assert_eq!(before - occupied, merges);
    assert_eq!(outcome.moved, outcome.cells.map(|c| c.value) != line.map(|c| c.value));
});
