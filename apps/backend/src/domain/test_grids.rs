//! Fixed grids shared by domain tests.

use crate::domain::board::{cell_index, Board};

/// A classic valid solved grid: each row shifts the previous pattern by 3.
pub(crate) fn solved_grid() -> Board {
    let rows: [[i8; 9]; 9] = [
        [1, 2, 3, 4, 5, 6, 7, 8, 9],
        [4, 5, 6, 7, 8, 9, 1, 2, 3],
        [7, 8, 9, 1, 2, 3, 4, 5, 6],
        [2, 3, 4, 5, 6, 7, 8, 9, 1],
        [5, 6, 7, 8, 9, 1, 2, 3, 4],
        [8, 9, 1, 2, 3, 4, 5, 6, 7],
        [3, 4, 5, 6, 7, 8, 9, 1, 2],
        [6, 7, 8, 9, 1, 2, 3, 4, 5],
        [9, 1, 2, 3, 4, 5, 6, 7, 8],
    ];
    let mut board = Board::empty();
    for (row, values) in rows.iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            board.set(cell_index(row, col), value);
        }
    }
    board
}
