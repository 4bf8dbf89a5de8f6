//! Move directions and line geometry.
//!
//! Every direction walks the board as four independent lines of four cells.
//! A line is listed front first: index 0 is the cell tiles slide toward.
//! Rows are displayed highest index first and each row from column 3 down
//! to column 0, so "left" slides toward column 3 and "up" toward row 3.

use serde::{Deserialize, Serialize};

use super::state::{CELL_COUNT, SIDE};

/// Board indices of one line, front first.
pub type Line = [usize; SIDE];

/// A direction to slide the tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// All directions in protocol order.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

/// Walk parameters for a direction: front cell of line 0, step between
/// lines, and step from the front of a line toward its back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub start: usize,
    pub line_step: isize,
    pub cell_step: isize,
}

impl Direction {
    /// Returns the lowercase name used on the wire and in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Parses a direction from its lowercase name.
    pub fn from_name(s: &str) -> Option<Direction> {
        match s {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub const fn geometry(self) -> Geometry {
        match self {
            Direction::Left => Geometry { start: 3, line_step: 4, cell_step: -1 },
            Direction::Right => Geometry { start: 0, line_step: 4, cell_step: 1 },
            Direction::Up => Geometry { start: 12, line_step: 1, cell_step: -4 },
            Direction::Down => Geometry { start: 0, line_step: 1, cell_step: 4 },
        }
    }

    /// Returns the four lines this direction collapses, front first.
    pub fn lines(self) -> [Line; SIDE] {
        let g = self.geometry();
        let mut lines = [[0usize; SIDE]; SIDE];
        for (l, line) in lines.iter_mut().enumerate() {
            let front = g.start as isize + l as isize * g.line_step;
            for (c, cell) in line.iter_mut().enumerate() {
                let idx = front + c as isize * g.cell_step;
                debug_assert!((0..CELL_COUNT as isize).contains(&idx));
                *cell = idx as usize;
            }
        }
        lines
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
