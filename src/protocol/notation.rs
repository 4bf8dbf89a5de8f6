//! Board notation encoding and decoding.
//!
//! The notation nests the board in two levels of brackets, rows listed from
//! the highest index down and each row from column 3 down to column 0:
//!
//! ```text
//! [[2 0 0 0] [0 0 0 0] [0 0 0 0] [0 0 0 2]]
//! ```
//!
//! The parser is lenient about layout: brackets, spaces, newlines and
//! carriage returns are all treated as separators, and values fill the board
//! from index 15 down to index 0. Anything after the sixteenth value is
//! ignored.

use std::str::FromStr;

use thiserror::Error;

use crate::board::{Board, CELL_COUNT, SIDE};

/// Errors that can occur while parsing board notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("unexpected character '{ch}' at byte {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("expected 16 tile values, found {0}")]
    TooFewValues(usize),

    #[error("tile value '{0}' does not fit a cell")]
    ValueOutOfRange(String),

    #[error("tile value {0} is not a power of two")]
    InvalidTile(u32),
}

/// Encodes a board as `[[v15 v14 v13 v12] ... [v3 v2 v1 v0]]`.
pub fn encode_notation(board: &Board) -> String {
    let mut out = String::with_capacity(64);
    out.push('[');
    for row in (0..SIDE).rev() {
        out.push('[');
        for col in (0..SIDE).rev() {
            out.push_str(&board.get(row, col).to_string());
            if col > 0 {
                out.push(' ');
            }
        }
        out.push(']');
        if row > 0 {
            out.push(' ');
        }
    }
    out.push(']');
    out
}

#[inline]
fn is_separator(b: u8) -> bool {
    matches!(b, b'[' | b']' | b' ' | b'\n' | b'\r')
}

/// Parses board notation, stopping once all sixteen cells are filled.
pub fn parse_notation(s: &str) -> Result<Board, NotationError> {
    let bytes = s.as_bytes();
    let mut board = Board::EMPTY;
    let mut remaining = CELL_COUNT;
    let mut pos = 0;

    while pos < bytes.len() && remaining > 0 {
        let b = bytes[pos];
        if is_separator(b) {
            pos += 1;
            continue;
        }
        if !b.is_ascii_digit() {
            let ch = s[pos..].chars().next().unwrap_or('?');
            return Err(NotationError::UnexpectedChar { ch, pos });
        }
        let start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let digits = &s[start..pos];
        let value: u32 = digits
            .parse()
            .map_err(|_| NotationError::ValueOutOfRange(digits.to_string()))?;
        if value != 0 && (value < 2 || !value.is_power_of_two()) {
            return Err(NotationError::InvalidTile(value));
        }

        remaining -= 1;
        board.cells[remaining] = value;
    }

    if remaining > 0 {
        return Err(NotationError::TooFewValues(CELL_COUNT - remaining));
    }
    Ok(board)
}

impl FromStr for Board {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_notation(s)
    }
}
