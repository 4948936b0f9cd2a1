//! The 4x4 grid and the slide/merge algorithm.
//!
//! Every direction is handled by one left-compaction primitive,
//! [`compact_and_merge_row`], composed with two reversible transforms:
//!
//! | Direction | before              | after               |
//! |-----------|---------------------|---------------------|
//! | left      | none                | none                |
//! | right     | reverse rows        | reverse rows        |
//! | up        | transpose           | transpose           |
//! | down      | transpose + reverse | reverse + transpose |

use std::fmt;

use crate::error::{GridError, GridResult};
use crate::game::{Cell, Direction, TileId, is_valid_value};

/// Side length of the grid.
pub const SIZE: usize = 4;

/// Tile value that wins the game.
pub const WIN_TILE: u32 = 2048;

/// Raw tile values in row-major order, 0 for empty.
pub type Values = [[u32; SIZE]; SIZE];

/// Result of compacting and merging a single line toward index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOutcome {
    /// The processed line.
    pub cells: [Cell; SIZE],
    /// Whether any cell changed position or merged.
    pub moved: bool,
    /// Sum of the values produced by merges.
    pub score: u64,
}

/// Result of sliding a whole grid, before any spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideOutcome {
    /// The grid after sliding and merging.
    pub grid: Grid,
    /// Score gained from merges in this slide.
    pub score_delta: u64,
    /// Whether anything moved or merged.
    pub moved: bool,
}

/// Compact a line toward index 0 and merge adjacent equal tiles.
///
/// A merge product is flagged `merged` and never merges again in the same
/// pass, so `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]` and `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]`. The surviving tile keeps its identity.
#[must_use]
pub fn compact_and_merge_row(row: [Cell; SIZE]) -> RowOutcome {
    let mut cells = [Cell::EMPTY; SIZE];
    let mut moved = false;
    let mut score = 0u64;

    let mut position = 0;
    for (i, cell) in row.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        cells[position] = *cell;
        if i != position {
            moved = true;
        }
        position += 1;
    }

    for i in 0..SIZE - 1 {
        let (left, right) = (cells[i], cells[i + 1]);
        if !left.can_merge_with(&right) || left.merged || right.merged {
            continue;
        }

        cells[i].value *= 2;
        cells[i].merged = true;
        score += u64::from(cells[i].value);

        cells.copy_within(i + 2.., i + 1);
        cells[SIZE - 1] = Cell::EMPTY;
        moved = true;
    }

    RowOutcome {
        cells,
        moved,
        score,
    }
}

/// The game grid: rows outer, columns inner.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[Cell; SIZE]; SIZE],
}

impl Grid {
    /// A grid with every cell empty.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [[Cell::EMPTY; SIZE]; SIZE],
        }
    }

    /// Build a grid from raw values, numbering tiles 1.. in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidValue`] if any value is neither 0 nor a
    /// power of two >= 2.
    pub fn from_values(values: Values) -> GridResult<Self> {
        let mut grid = Self::empty();
        let mut next_id = 1u64;

        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if !is_valid_value(value) {
                    return Err(GridError::InvalidValue { row, col, value });
                }
                if value != 0 {
                    grid.cells[row][col] = Cell::tile(value, TileId(next_id));
                    next_id += 1;
                }
            }
        }

        Ok(grid)
    }

    /// Raw tile values, 0 for empty.
    #[must_use]
    pub fn values(&self) -> Values {
        self.cells.map(|row| row.map(|cell| cell.value))
    }

    /// Get the cell at a position.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|line| line.get(col))
    }

    /// Get a mutable reference to the cell at a position.
    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(row).and_then(|line| line.get_mut(col))
    }

    /// Borrow the rows of the grid.
    #[must_use]
    pub const fn rows(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    /// Iterate over all cells with their positions, row-major.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, cell)| ((row, col), cell))
        })
    }

    /// Positions of all empty cells, row-major.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Count the empty cells.
    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.iter().filter(|(_, cell)| cell.is_empty()).count()
    }

    /// Highest tile value on the grid (0 if empty).
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.iter().map(|(_, cell)| cell.value).max().unwrap_or(0)
    }

    /// Check if any cell holds exactly `value`.
    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.iter().any(|(_, cell)| cell.value == value)
    }

    /// Check whether no move can change the grid.
    ///
    /// True iff there is no empty cell and no horizontally or vertically
    /// adjacent pair can merge. A merge needs an equal neighbour no matter
    /// which direction is chosen, so one scan is enough.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let cell = &self.cells[row][col];
                if cell.is_empty() {
                    return false;
                }
                if col + 1 < SIZE && cell.can_merge_with(&self.cells[row][col + 1]) {
                    return false;
                }
                if row + 1 < SIZE && cell.can_merge_with(&self.cells[row + 1][col]) {
                    return false;
                }
            }
        }
        true
    }

    /// Return the grid with every transient flag cleared.
    #[must_use]
    pub fn cleared_flags(&self) -> Self {
        Self {
            cells: self.cells.map(|row| row.map(Cell::without_flags)),
        }
    }

    /// Swap rows and columns.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::empty();
        for (row, line) in self.cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                out.cells[col][row] = *cell;
            }
        }
        out
    }

    /// Reverse the order of cells within each row.
    #[must_use]
    pub fn reverse_rows(&self) -> Self {
        let mut out = *self;
        for line in &mut out.cells {
            line.reverse();
        }
        out
    }

    /// Rotate the grid so `direction` becomes a slide to the left.
    fn oriented(&self, direction: Direction) -> Self {
        match direction {
            Direction::Left => *self,
            Direction::Right => self.reverse_rows(),
            Direction::Up => self.transpose(),
            Direction::Down => self.transpose().reverse_rows(),
        }
    }

    /// Undo [`Grid::oriented`].
    fn restored(&self, direction: Direction) -> Self {
        match direction {
            Direction::Left => *self,
            Direction::Right => self.reverse_rows(),
            Direction::Up => self.transpose(),
            Direction::Down => self.reverse_rows().transpose(),
        }
    }

    /// Slide and merge toward `direction` without spawning a tile.
    ///
    /// Transient flags are cleared first, so `merged` on the result marks
    /// exactly the merges of this slide. `self` is left untouched.
    #[must_use]
    pub fn slide(&self, direction: Direction) -> SlideOutcome {
        let mut work = self.cleared_flags().oriented(direction);
        let mut moved = false;
        let mut score_delta = 0u64;

        for line in &mut work.cells {
            let outcome = compact_and_merge_row(*line);
            *line = outcome.cells;
            moved |= outcome.moved;
            score_delta += outcome.score;
        }

        SlideOutcome {
            grid: work.restored(direction),
            score_delta,
            moved,
        }
    }

    /// Directions that would change the grid, in [`Direction::ALL`] order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.slide(dir).moved)
            .collect()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({:?})", self.values())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "+------+------+------+------+";
        writeln!(f, "{separator}")?;
        for line in &self.cells {
            write!(f, "|")?;
            for cell in line {
                if cell.is_empty() {
                    write!(f, "{:^6}|", ".")?;
                } else {
                    write!(f, "{:^6}|", cell.value)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{separator}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MAX_TILE;

    fn row_of(values: [u32; SIZE]) -> [Cell; SIZE] {
        let mut row = [Cell::EMPTY; SIZE];
        for (i, &value) in values.iter().enumerate() {
            if value != 0 {
                row[i] = Cell::tile(value, TileId(i as u64 + 1));
            }
        }
        row
    }

    fn row_values(cells: &[Cell; SIZE]) -> [u32; SIZE] {
        cells.map(|c| c.value)
    }

    fn grid(values: Values) -> Grid {
        Grid::from_values(values).unwrap()
    }

    #[test]
    fn test_row_merge_then_slide() {
        let out = compact_and_merge_row(row_of([2, 2, 4, 0]));
        assert_eq!(row_values(&out.cells), [4, 4, 0, 0]);
        assert_eq!(out.score, 4);
        assert!(out.moved);
        assert!(out.cells[0].merged);
        assert!(!out.cells[1].merged);
    }

    #[test]
    fn test_row_four_equal() {
        let out = compact_and_merge_row(row_of([2, 2, 2, 2]));
        assert_eq!(row_values(&out.cells), [4, 4, 0, 0]);
        assert_eq!(out.score, 8);
        assert!(out.moved);
    }

    #[test]
    fn test_row_three_equal_merges_once() {
        let out = compact_and_merge_row(row_of([2, 2, 2, 0]));
        assert_eq!(row_values(&out.cells), [4, 2, 0, 0]);
        assert_eq!(out.score, 4);
    }

    #[test]
    fn test_row_merge_product_does_not_remerge() {
        // 4 produced from 2+2 must not absorb the existing 4.
        let out = compact_and_merge_row(row_of([2, 2, 4, 4]));
        assert_eq!(row_values(&out.cells), [4, 8, 0, 0]);
        assert_eq!(out.score, 12);
    }

    #[test]
    fn test_row_compaction_only() {
        let out = compact_and_merge_row(row_of([0, 2, 0, 4]));
        assert_eq!(row_values(&out.cells), [2, 4, 0, 0]);
        assert_eq!(out.score, 0);
        assert!(out.moved);
    }

    #[test]
    fn test_row_no_change() {
        let out = compact_and_merge_row(row_of([2, 4, 8, 0]));
        assert_eq!(row_values(&out.cells), [2, 4, 8, 0]);
        assert!(!out.moved);
    }

    #[test]
    fn test_row_merged_tile_keeps_left_identity() {
        let out = compact_and_merge_row(row_of([0, 2, 2, 0]));
        assert_eq!(out.cells[0].id, Some(TileId(2)));
    }

    #[test]
    fn test_slide_left_scenario() {
        let g = grid([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
        let out = g.slide(Direction::Left);
        assert_eq!(out.grid.values()[0], [4, 4, 0, 0]);
        assert_eq!(out.score_delta, 4);
        assert!(out.moved);
    }

    #[test]
    fn test_slide_right_no_op() {
        let g = grid([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let out = g.slide(Direction::Right);
        assert!(!out.moved);
        assert_eq!(out.grid.values(), g.values());
    }

    #[test]
    fn test_slide_right() {
        let g = grid([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
        let out = g.slide(Direction::Right);
        assert_eq!(out.grid.values()[0], [0, 0, 4, 4]);
        assert_eq!(out.score_delta, 4);
    }

    #[test]
    fn test_slide_up_and_down() {
        let g = grid([[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0]]);

        let up = g.slide(Direction::Up).grid.values();
        assert_eq!([up[0][0], up[1][0], up[2][0], up[3][0]], [4, 4, 0, 0]);

        let down = g.slide(Direction::Down).grid.values();
        assert_eq!([down[0][0], down[1][0], down[2][0], down[3][0]], [0, 0, 4, 4]);
    }

    #[test]
    fn test_down_merges_from_bottom() {
        let g = grid([[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0]]);
        let down = g.slide(Direction::Down).grid.values();
        assert_eq!([down[0][0], down[1][0], down[2][0], down[3][0]], [0, 0, 2, 4]);
    }

    #[test]
    fn test_slide_does_not_mutate_source() {
        let g = grid([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = g;
        let outcome = g.slide(Direction::Left);
        assert!(outcome.moved);
        assert_eq!(g, before);
    }

    #[test]
    fn test_transforms_are_involutions() {
        let g = grid([[2, 4, 8, 16], [32, 64, 128, 256], [0, 2, 0, 4], [8, 0, 0, 2]]);
        assert_eq!(g.transpose().transpose(), g);
        assert_eq!(g.reverse_rows().reverse_rows(), g);
        assert_eq!(g.transpose().values()[0], [2, 32, 0, 8]);
    }

    #[test]
    fn test_terminal_checkerboard() {
        let g = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(g.is_terminal());
        assert!(g.legal_moves().is_empty());
    }

    #[test]
    fn test_not_terminal_with_empty_cell() {
        let g = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 0]]);
        assert!(!g.is_terminal());
    }

    #[test]
    fn test_not_terminal_with_vertical_pair() {
        let g = grid([[2, 4, 2, 4], [2, 8, 4, 2], [8, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!g.is_terminal());
        assert_eq!(g.legal_moves(), vec![Direction::Up, Direction::Down]);
    }

    #[test]
    fn test_row_top_value_pair_stays_put() {
        let outcome = compact_and_merge_row(row_of([MAX_TILE, MAX_TILE, 0, 0]));
        assert_eq!(row_values(&outcome.cells), [MAX_TILE, MAX_TILE, 0, 0]);
        assert!(!outcome.moved);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_row_merges_up_to_top_value() {
        let half = MAX_TILE >> 1;
        let outcome = compact_and_merge_row(row_of([0, half, half, 2]));
        assert_eq!(row_values(&outcome.cells), [MAX_TILE, 2, 0, 0]);
        assert_eq!(outcome.score, u64::from(MAX_TILE));
    }

    #[test]
    fn test_slide_top_value_pair() {
        let g = grid([[MAX_TILE, MAX_TILE, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let left = g.slide(Direction::Left);
        assert!(!left.moved);
        assert_eq!(left.grid.values(), g.values());

        let right = g.slide(Direction::Right);
        assert!(right.moved);
        assert_eq!(right.score_delta, 0);
        assert_eq!(right.grid.values()[0], [0, 0, MAX_TILE, MAX_TILE]);
    }

    #[test]
    fn test_top_value_grid_is_terminal() {
        let g = grid([[MAX_TILE; SIZE]; SIZE]);
        assert!(g.is_terminal());
        assert!(g.legal_moves().is_empty());
    }

    #[test]
    fn test_from_values_rejects_non_power_of_two() {
        let err = Grid::from_values([[0, 3, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidValue {
                row: 0,
                col: 1,
                value: 3
            }
        );
    }

    #[test]
    fn test_counts() {
        let g = grid([[2, 0, 0, 0], [0, 2048, 0, 0], [0; 4], [0; 4]]);
        assert_eq!(g.count_empty(), 14);
        assert_eq!(g.max_tile(), 2048);
        assert!(g.contains(WIN_TILE));
        assert_eq!(g.empty_positions().len(), 14);
        assert_eq!(g.empty_positions()[0], (0, 1));
    }

    #[test]
    fn test_display_renders_rows() {
        let g = grid([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 1024]]);
        let text = g.to_string();
        assert_eq!(text.lines().count(), 9);
        assert!(text.contains("1024"));
    }
}
