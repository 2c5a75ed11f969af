//! Move and solution legality.

use crate::domain::board::{Board, CellPos, CELL_COUNT, GRID_SIZE, MAX_DIGIT, MIN_DIGIT};

/// A match starts once exactly this many players have joined.
pub const REQUIRED_PLAYERS: usize = 2;

/// Whether a fill request targets a fillable cell with an in-range digit.
///
/// True iff `index` is inside the board, the puzzle's cell at `index` is
/// empty (givens are never fillable, even with the correct digit), and `num`
/// is in `1..=9`. This deliberately does NOT check the player's evolving
/// board against row/column/box constraints; Sudoku-rule correctness is
/// judged only when a full solution is submitted.
pub fn is_valid_move(index: i32, puzzle: &Board, num: i32) -> bool {
    if !(0..CELL_COUNT as i32).contains(&index) {
        return false;
    }
    let fillable = puzzle.is_empty_cell(index as usize);
    let digit_in_range = (i32::from(MIN_DIGIT)..=i32::from(MAX_DIGIT)).contains(&num);
    fillable && digit_in_range
}

/// Whether `board` is a complete, correct solution: every cell holds a digit
/// in `1..=9` and no row, column, or box repeats a digit. The 81-cell length
/// is guaranteed by the board type itself.
pub fn is_solved(board: &Board) -> bool {
    let mut rows = [0u16; GRID_SIZE];
    let mut cols = [0u16; GRID_SIZE];
    let mut boxes = [0u16; GRID_SIZE];

    for index in 0..CELL_COUNT {
        let value = board.get(index);
        if !(MIN_DIGIT..=MAX_DIGIT).contains(&value) {
            return false;
        }
        let bit = 1u16 << (value - 1);
        let pos = CellPos::of(index);
        if rows[pos.row] & bit != 0 || cols[pos.col] & bit != 0 || boxes[pos.box_index] & bit != 0 {
            return false;
        }
        rows[pos.row] |= bit;
        cols[pos.col] |= bit;
        boxes[pos.box_index] |= bit;
    }
    true
}
