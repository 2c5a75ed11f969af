//! Property tests for move validation and the removal quota.

use proptest::prelude::*;

use crate::domain::board::{Board, CELL_COUNT, EMPTY_CELL, OCCUPIED_CELL};
use crate::domain::generator::removal_quota;
use crate::domain::rules::{is_solved, is_valid_move};
use crate::domain::test_grids::solved_grid;

proptest! {
    #[test]
    fn removal_quota_is_monotone_in_difficulty(d1 in 0.0f64..=1.0, d2 in 0.0f64..=1.0) {
        let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        prop_assert!(removal_quota(lo) <= removal_quota(hi));
    }

    #[test]
    fn indices_outside_the_board_are_rejected(
        index in prop_oneof![i32::MIN..0, CELL_COUNT as i32..i32::MAX],
        num in 1..=9i32,
    ) {
        prop_assert!(!is_valid_move(index, &Board::empty(), num));
    }

    #[test]
    fn digits_outside_one_to_nine_are_rejected(
        index in 0..CELL_COUNT as i32,
        num in prop_oneof![i32::MIN..1, 10..i32::MAX],
    ) {
        prop_assert!(!is_valid_move(index, &Board::empty(), num));
    }

    #[test]
    fn given_cells_are_never_fillable(
        index in 0..CELL_COUNT as i32,
        given in 1..=9i8,
        num in 1..=9i32,
    ) {
        let mut puzzle = Board::empty();
        puzzle.set(index as usize, given);
        prop_assert!(!is_valid_move(index, &puzzle, num));
    }

    #[test]
    fn any_corruption_of_a_solved_grid_fails_the_check(
        index in 0..CELL_COUNT,
        value in prop_oneof![Just(EMPTY_CELL), Just(OCCUPIED_CELL), Just(0i8), Just(10i8)],
    ) {
        let mut board = solved_grid();
        board.set(index, value);
        prop_assert!(!is_solved(&board));
    }
}
