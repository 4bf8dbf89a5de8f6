//! Session configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::eval::Strategy;
use crate::game::GameConfig;

/// Games between periodic average reports.
pub const DEFAULT_REPORT_INTERVAL: u64 = 16384;

/// Read/write timeout for the remote board client.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// How many games a session plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCount {
    Limited(u64),
    /// Keep playing until interrupted.
    Unbounded,
}

impl GameCount {
    /// Returns true once `played` games use up the budget.
    pub fn is_exhausted(self, played: u64) -> bool {
        match self {
            GameCount::Limited(n) => played >= n,
            GameCount::Unbounded => false,
        }
    }
}

/// Everything a session needs, built from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Print the board before every move.
    pub verbose: bool,
    /// Print periodic average scores.
    pub average: bool,
    pub games: GameCount,
    pub strategy: Strategy,
    /// Remote board server, `host` or `host:port`.
    pub server: Option<String>,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// JSONL file receiving one record per finished game.
    pub record: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub report_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            verbose: false,
            average: false,
            games: GameCount::Limited(1),
            strategy: Strategy::Up,
            server: None,
            seed: None,
            record: None,
            timeout: Some(Duration::from_millis(DEFAULT_TIMEOUT_MS)),
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

impl Config {
    /// The per-game subset of the configuration.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            strategy: self.strategy,
            verbose: self.verbose,
        }
    }
}
