//! Board representation.
//!
//! A 4x4 grid of tile values stored row-major (index = row * 4 + column).
//! Empty cells hold 0; every other cell holds a power of two no smaller than 2.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::direction::ALL_DIRECTIONS;

/// Cells per row and rows per board.
pub const SIDE: usize = 4;

/// Total number of cells.
pub const CELL_COUNT: usize = SIDE * SIDE;

/// The playing grid.
///
/// Plain `Copy` array so candidate moves can be tried on throwaway clones
/// without touching the real board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    pub cells: [u32; CELL_COUNT],
}

impl Board {
    /// An empty board.
    pub const EMPTY: Board = Board { cells: [0; CELL_COUNT] };

    pub const fn from_cells(cells: [u32; CELL_COUNT]) -> Self {
        Board { cells }
    }

    /// Returns the value at `row`, `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row * SIDE + col]
    }

    /// Sets the value at `row`, `col`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        self.cells[row * SIDE + col] = value;
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Largest tile on the board (0 for an empty board).
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tiles.
    pub fn tile_sum(&self) -> u32 {
        self.cells.iter().sum()
    }

    /// Returns true if every cell is either empty or a power of two >= 2.
    pub fn is_well_formed(&self) -> bool {
        self.cells.iter().all(|&v| v == 0 || (v >= 2 && v.is_power_of_two()))
    }

    /// Returns true if no direction changes the board.
    pub fn is_stuck(&self) -> bool {
        ALL_DIRECTIONS.iter().all(|&d| {
            let mut probe = *self;
            !probe.shift(d).is_legal()
        })
    }
}

/// Prints rows highest index first, each row from column 3 down to 0,
/// every value right-aligned in five columns, followed by a blank line.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..SIDE).rev() {
            for col in (0..SIDE).rev() {
                let sep = if col == 0 { '\n' } else { ' ' };
                write!(f, "{:5}{}", self.get(row, col), sep)?;
            }
        }
        writeln!(f)
    }
}
