//! One-ply lookahead.
//!
//! Tries each direction on a throwaway copy of the board and keeps the one
//! the scorer likes best. The real board is only ever borrowed.

use log::trace;

use crate::board::{Board, Direction, MoveOutcome};
use crate::eval::CandidateScorer;

/// The winning direction and what it earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub direction: Direction,
    pub candidate_score: u64,
    pub outcome: MoveOutcome,
}

/// Returns the best legal move, or `None` if no direction both changes the
/// board and leaves a free cell for the next spawn.
///
/// Directions are tried in the scorer's preferred order and only a strictly
/// higher score replaces the current best, so the first maximum wins.
pub fn best_move(board: &Board, scorer: &dyn CandidateScorer) -> Option<Evaluation> {
    let mut best: Option<Evaluation> = None;

    for direction in scorer.preferred_order(board) {
        let mut candidate = *board;
        let outcome = candidate.shift(direction);
        if !outcome.is_legal() || candidate.empty_count() == 0 {
            continue;
        }

        let candidate_score = scorer.score_candidate(board, &candidate, outcome);
        trace!("candidate {} scores {}", direction, candidate_score);

        if best.map_or(true, |b| candidate_score > b.candidate_score) {
            best = Some(Evaluation {
                direction,
                candidate_score,
                outcome,
            });
        }
    }

    best
}

/// Like [`best_move`] but always yields a direction, falling back to up.
///
/// Callers that need to tell "nothing improves" apart should use
/// [`best_move`] instead.
pub fn choose_move(board: &Board, scorer: &dyn CandidateScorer) -> Direction {
    best_move(board, scorer)
        .map(|e| e.direction)
        .unwrap_or(Direction::Up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CELL_COUNT;
    use crate::eval::{order_bonus, GreedyScore, Serpentine};

    fn stuck_board() -> Board {
        let mut cells = [0u32; CELL_COUNT];
        for (i, c) in cells.iter_mut().enumerate() {
            *c = if (i / 4 + i % 4) % 2 == 0 { 2 } else { 4 };
        }
        Board::from_cells(cells)
    }

    #[test]
    fn original_board_is_never_mutated() {
        let mut b = Board::EMPTY;
        b.cells[13] = 2;
        b.cells[12] = 2;
        b.cells[4] = 8;
        let before = b;
        let _ = best_move(&b, &GreedyScore);
        let _ = best_move(&b, &Serpentine);
        assert_eq!(b, before);
    }

    #[test]
    fn greedy_picks_the_merge() {
        let mut b = Board::EMPTY;
        b.cells[13] = 2;
        b.cells[12] = 2;
        let e = best_move(&b, &GreedyScore).unwrap();
        // up cannot move the top row; left and right both merge for 4
        assert_eq!(e.direction, Direction::Left);
        assert_eq!(e.candidate_score, 4);
        assert_eq!(e.outcome.score, 4);
    }

    #[test]
    fn greedy_prefers_higher_score_over_order() {
        let mut b = Board::EMPTY;
        // column 0 holds a vertical pair of 8s, row 3 a horizontal pair of 2s
        b.cells[0] = 8;
        b.cells[4] = 8;
        b.cells[14] = 2;
        b.cells[15] = 2;
        let e = best_move(&b, &GreedyScore).unwrap();
        assert_eq!(e.direction, Direction::Up);
        assert_eq!(e.outcome.score, 16);
    }

    #[test]
    fn zero_score_move_beats_no_move() {
        let mut b = Board::EMPTY;
        b.cells[0] = 2;
        let e = best_move(&b, &GreedyScore).unwrap();
        assert_eq!(e.direction, Direction::Up);
        assert_eq!(e.candidate_score, 0);
    }

    #[test]
    fn stuck_board_has_no_best_move() {
        let b = stuck_board();
        assert!(best_move(&b, &GreedyScore).is_none());
        assert!(best_move(&b, &Serpentine).is_none());
        assert_eq!(choose_move(&b, &GreedyScore), Direction::Up);
    }

    #[test]
    fn serpentine_follows_its_preferred_order() {
        // empty top-right corner: left is tried first and wins the tie
        let mut b = Board::EMPTY;
        b.cells[13] = 2;
        let e = best_move(&b, &Serpentine).unwrap();
        assert_eq!(e.direction, Direction::Left);
        assert_eq!(e.candidate_score, order_bonus(&b));
    }
}
