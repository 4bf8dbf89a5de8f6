//! Line collapse and full-board moves.
//!
//! `collapse_line` is the only place tiles slide or merge. A move applies it
//! to the four lines of a direction and sums the results.

use super::direction::{Direction, Line};
use super::state::{Board, SIDE};

/// Result of collapsing one line or a whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// Sum of the tiles created by merges.
    pub score: u32,
    /// Number of slides plus merges performed.
    pub mutations: u32,
}

impl MoveOutcome {
    /// A move is legal iff it changed at least one cell.
    #[inline]
    pub fn is_legal(&self) -> bool {
        self.mutations > 0
    }
}

impl std::ops::AddAssign for MoveOutcome {
    fn add_assign(&mut self, rhs: MoveOutcome) {
        self.score += rhs.score;
        self.mutations += rhs.mutations;
    }
}

/// Collapses one line of `cells` toward its front.
///
/// For each target slot, front to back, non-empty cells behind it are pulled
/// in: the first one slides into an empty target, and the next one merges
/// into an equal target or blocks. A merge or a block ends the scan for that
/// target, so a merged tile never merges again in the same pass.
pub fn collapse_line(cells: &mut [u32], line: &Line) -> MoveOutcome {
    let mut out = MoveOutcome::default();
    for to in 0..SIDE {
        for from in to + 1..SIDE {
            let value = cells[line[from]];
            if value == 0 {
                continue;
            }
            let target = cells[line[to]];
            if target == 0 {
                cells[line[to]] = value;
                cells[line[from]] = 0;
                out.mutations += 1;
                // the slid tile can still take one merge
                continue;
            }
            if target == value {
                cells[line[to]] = target * 2;
                out.score += target * 2;
                cells[line[from]] = 0;
                out.mutations += 1;
            }
            break;
        }
    }
    out
}

impl Board {
    /// Slides every line in `direction`. Never spawns a tile.
    pub fn shift(&mut self, direction: Direction) -> MoveOutcome {
        let mut total = MoveOutcome::default();
        for line in direction.lines() {
            total += collapse_line(&mut self.cells, &line);
        }
        total
    }
}
