//! Move evaluation.
//!
//! Player strategies and the scoring hooks the one-ply search uses to rank
//! hypothetical moves.

pub mod serpentine;
pub mod strategy;

pub use serpentine::{order_bonus, preferred_order, SERPENTINE};
pub use strategy::{CandidateScorer, GreedyScore, Serpentine, Strategy, FIXED_ORDER};
