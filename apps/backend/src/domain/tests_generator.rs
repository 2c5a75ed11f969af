//! Structural generator tests.
//!
//! Generation is randomized per invocation, so these assert properties
//! (validity, uniqueness, removal bounds), never exact board contents.

use crate::domain::board::{Board, CELL_COUNT, EMPTY_CELL};
use crate::domain::generator::{
    count_solutions, generate, is_valid_placement, removal_quota, solve,
};
use crate::domain::rules::is_solved;

fn removed_cells(puzzle: &Board) -> usize {
    puzzle.empty_indices().count()
}

#[test]
fn removal_quota_covers_the_documented_range() {
    assert_eq!(removal_quota(0.0), 25);
    assert_eq!(removal_quota(0.5), 40);
    assert_eq!(removal_quota(1.0), 55);
    // out-of-range difficulties clamp instead of under/overshooting
    assert_eq!(removal_quota(-2.0), 25);
    assert_eq!(removal_quota(7.5), 55);
}

#[test]
fn generated_puzzle_has_exactly_one_solution() {
    let puzzle = generate(0.4);
    assert_eq!(count_solutions(&puzzle), 1);
}

#[test]
fn generated_puzzle_meets_the_quota_at_low_difficulty() {
    // 25 removals out of 81 leaves 56 clues; the carving pass always finds
    // that many uniqueness-preserving clearances
    let puzzle = generate(0.0);
    assert_eq!(removed_cells(&puzzle), removal_quota(0.0));
}

#[test]
fn generated_puzzle_never_exceeds_the_quota() {
    let puzzle = generate(1.0);
    assert!(removed_cells(&puzzle) <= removal_quota(1.0));
}

#[test]
fn solution_extends_the_puzzle_and_respects_placement_rules() {
    let puzzle = generate(0.2);
    let solution = solve(&puzzle).expect("generated puzzles are solvable");
    assert!(is_solved(&solution));

    // givens survive into the solution untouched
    for index in 0..CELL_COUNT {
        if puzzle.get(index) != EMPTY_CELL {
            assert_eq!(solution.get(index), puzzle.get(index));
        }
    }

    // replaying the solution cell by cell never violates distinctness
    let mut partial = puzzle;
    for index in 0..CELL_COUNT {
        if partial.is_empty_cell(index) {
            let digit = solution.get(index);
            assert!(is_valid_placement(&partial, index, digit));
            partial.set(index, digit);
        }
    }
}

#[test]
fn solve_returns_none_when_a_cell_has_no_candidate() {
    // row 0 holds 1..=8 and the cell below (0,0) holds 9, so (0,0) has no
    // legal digit left
    let mut board = Board::empty();
    for col in 1..9 {
        board.set(col, col as i8);
    }
    board.set(9, 9);
    assert!(solve(&board).is_none());
    assert_eq!(count_solutions(&board), 0);
}

#[test]
fn solution_counter_caps_at_two() {
    // the empty grid has a vast solution space; the counter must stop at
    // the second solution it reaches
    assert_eq!(count_solutions(&Board::empty()), 2);
}

#[test]
fn full_grids_count_as_a_single_solution() {
    let full = solve(&Board::empty()).expect("empty grid is solvable");
    assert_eq!(count_solutions(&full), 1);
}
