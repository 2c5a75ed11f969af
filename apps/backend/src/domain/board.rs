//! Flat 81-cell board representation and coordinate mapping.
//!
//! Cells are stored row-major: `index = row * 9 + col`. A cell holds either
//! a digit `1..=9`, [`EMPTY_CELL`], or (in public progress boards only)
//! [`OCCUPIED_CELL`], the marker shown to opponents in place of the real
//! value.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

pub const GRID_SIZE: usize = 9;
pub const BOX_SIZE: usize = 3;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

pub const EMPTY_CELL: i8 = -1;
pub const OCCUPIED_CELL: i8 = -2;
pub const MIN_DIGIT: i8 = 1;
pub const MAX_DIGIT: i8 = 9;

/// A 9x9 Sudoku board as a flat array of cell values.
///
/// Serializes as a plain 81-element array, the wire shape clients expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [i8; CELL_COUNT],
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.cells[..].serialize(serializer)
    }
}

impl Board {
    /// A board with every cell empty.
    pub const fn empty() -> Self {
        Self {
            cells: [EMPTY_CELL; CELL_COUNT],
        }
    }

    /// Cell value at `index`. Precondition: `index < 81` (callers are
    /// internal; out-of-range indices are a caller bug, not a runtime error).
    pub fn get(&self, index: usize) -> i8 {
        debug_assert!(index < CELL_COUNT, "cell index out of range: {index}");
        self.cells[index]
    }

    pub fn set(&mut self, index: usize, value: i8) {
        debug_assert!(index < CELL_COUNT, "cell index out of range: {index}");
        self.cells[index] = value;
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        self.get(index) == EMPTY_CELL
    }

    pub fn cells(&self) -> &[i8; CELL_COUNT] {
        &self.cells
    }

    /// Indices of all empty cells, in ascending order.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == EMPTY_CELL)
            .map(|(i, _)| i)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for Board {
    /// Renders the grid with box separators, `.` for empty cells. Diagnostic
    /// output only; never part of a wire payload.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for row in 0..GRID_SIZE {
            if row % BOX_SIZE == 0 && row != 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..GRID_SIZE {
                if col % BOX_SIZE == 0 && col != 0 {
                    write!(f, "| ")?;
                }
                match self.cells[cell_index(row, col)] {
                    EMPTY_CELL => write!(f, ". ")?,
                    value => write!(f, "{value} ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Flat index for a (row, col) pair. Precondition: both in `0..9`.
#[inline]
pub fn cell_index(row: usize, col: usize) -> usize {
    debug_assert!(
        row < GRID_SIZE && col < GRID_SIZE,
        "coordinates out of range: ({row}, {col})"
    );
    row * GRID_SIZE + col
}

/// Row, column, and box coordinates of a flat cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
    pub box_index: usize,
}

impl CellPos {
    /// Decomposes a flat index. Precondition: `index < 81`.
    #[inline]
    pub fn of(index: usize) -> Self {
        debug_assert!(index < CELL_COUNT, "cell index out of range: {index}");
        let row = index / GRID_SIZE;
        let col = index % GRID_SIZE;
        Self {
            row,
            col,
            box_index: (row / BOX_SIZE) * BOX_SIZE + col / BOX_SIZE,
        }
    }
}
