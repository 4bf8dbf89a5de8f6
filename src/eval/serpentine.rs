//! Serpentine tile ordering used by the left-right player.
//!
//! The ideal layout keeps tiles sorted along a snake through the board:
//! the top row from column 3 to column 0, the next row back from column 0
//! to column 3, and so on down to the bottom row.

use crate::board::{Board, Direction, CELL_COUNT, SIDE};

use super::strategy::FIXED_ORDER;

/// Cell indices in serpentine order, top row first.
pub const SERPENTINE: [usize; CELL_COUNT] = [15, 14, 13, 12, 8, 9, 10, 11, 7, 6, 5, 4, 0, 1, 2, 3];

/// Sums every tile whose serpentine successor is at least as large.
pub fn order_bonus(board: &Board) -> u64 {
    SERPENTINE
        .windows(2)
        .filter(|w| board.cells[w[1]] >= board.cells[w[0]])
        .map(|w| board.cells[w[0]] as u64)
        .sum()
}

/// Reorders the fixed preference around the first gap or mergeable pair
/// along the snake.
///
/// On an odd row (one that runs from column 0 to column 3) right is tried
/// before left. If the trigger is an empty cell, the horizontal move is
/// promoted ahead of up so the gap gets filled.
pub fn preferred_order(board: &Board) -> [Direction; 4] {
    let mut order = FIXED_ORDER;
    for i in 0..CELL_COUNT {
        let value = board.cells[SERPENTINE[i]];
        let pair = i % SIDE != SIDE - 1 && value == board.cells[SERPENTINE[i + 1]];
        if value != 0 && !pair {
            continue;
        }
        if (i / SIDE) % 2 == 1 {
            order[1] = Direction::Right;
            order[2] = Direction::Left;
        }
        if value == 0 {
            order[0] = order[1];
            order[1] = Direction::Up;
        }
        break;
    }
    order
}
