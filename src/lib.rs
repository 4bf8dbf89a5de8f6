//! twenty48 library.
//!
//! Exposes the board engine, move evaluation, one-ply search, the game and
//! session loops, and the remote board protocol for use by integration tests
//! and the binary entry point.

pub mod board;
pub mod cli;
pub mod config;
pub mod eval;
pub mod game;
pub mod protocol;
pub mod search;
pub mod session;
