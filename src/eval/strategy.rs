//! Player strategies and candidate scoring.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Direction, MoveOutcome};

use super::serpentine;

/// Move order of the fixed-order player, and the default preference of the
/// evaluating players.
pub const FIXED_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Right,
    Direction::Down,
];

/// How the automatic player picks its next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Try up, left, right, down and play the first that moves.
    #[default]
    Up,
    /// Greedy on the immediate merge score.
    Score,
    /// Merge score plus a bonus for keeping tiles sorted along the snake.
    LeftRight,
}

impl Strategy {
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Up => "up",
            Strategy::Score => "score",
            Strategy::LeftRight => "left-right",
        }
    }

    /// Returns the candidate scorer, or `None` for the fixed-order player
    /// which never looks ahead.
    pub fn scorer(self) -> Option<&'static dyn CandidateScorer> {
        match self {
            Strategy::Up => None,
            Strategy::Score => Some(&GreedyScore),
            Strategy::LeftRight => Some(&Serpentine),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scores hypothetical moves for the one-ply evaluator.
pub trait CandidateScorer {
    /// Order in which directions are tried; earlier wins ties.
    fn preferred_order(&self, _board: &Board) -> [Direction; 4] {
        FIXED_ORDER
    }

    /// Scores the move that turned `original` into `candidate`.
    fn score_candidate(&self, original: &Board, candidate: &Board, outcome: MoveOutcome) -> u64;
}

/// Immediate merge score.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyScore;

impl CandidateScorer for GreedyScore {
    fn score_candidate(&self, _original: &Board, _candidate: &Board, outcome: MoveOutcome) -> u64 {
        outcome.score as u64
    }
}

/// Merge score plus the snake-order bonus of the position moved from.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serpentine;

impl CandidateScorer for Serpentine {
    fn preferred_order(&self, board: &Board) -> [Direction; 4] {
        serpentine::preferred_order(board)
    }

    fn score_candidate(&self, original: &Board, _candidate: &Board, outcome: MoveOutcome) -> u64 {
        outcome.score as u64 + serpentine::order_bonus(original)
    }
}
