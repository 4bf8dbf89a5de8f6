//! Move search.
//!
//! Picks the next move by looking one move ahead with a strategy's scorer.

pub mod one_ply;

pub use one_ply::{best_move, choose_move, Evaluation};
