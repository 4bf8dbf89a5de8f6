//! Multi-game sessions.
//!
//! Plays games back to back, keeps the running high score and average, and
//! reports them the way the console player always has: a `score` line plus
//! the final board whenever the high score improves, and an `avg.` line at
//! the configured interval otherwise.

use std::io::{self, Write};

use log::info;
use rand::Rng;
use thiserror::Error;

use crate::config::{Config, GameCount};
use crate::game::{play_game, BoardSource, GameRecord};
use crate::protocol::ClientError;

/// Errors that abort a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Remote(#[from] ClientError),

    #[error("output error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot write game record: {0}")]
    Record(#[from] serde_json::Error),
}

/// Running statistics over the games of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub games_played: u64,
    pub high_score: u64,
    pub total_score: u64,
    /// The game that set the current high score.
    pub best: Option<GameRecord>,
}

impl SessionStats {
    /// Integer average over all completed games.
    pub fn average(&self) -> u64 {
        self.total_score / self.games_played.max(1)
    }

    /// Folds in a finished game. Returns true if it set a new high score.
    pub fn record(&mut self, game: &GameRecord) -> bool {
        self.games_played += 1;
        self.total_score += game.score;
        if game.score > self.high_score {
            self.high_score = game.score;
            self.best = Some(game.clone());
            true
        } else {
            false
        }
    }
}

/// Returns true if an average report is due after `played` games.
///
/// Bounded runs report whenever the number of games still to play is a
/// multiple of the interval, which includes the final game. Unbounded runs
/// report every `interval` games.
fn report_due(games: GameCount, played: u64, interval: u64) -> bool {
    let interval = interval.max(1);
    match games {
        GameCount::Limited(total) => total.saturating_sub(played) % interval == 0,
        GameCount::Unbounded => played % interval == 0,
    }
}

/// Plays every game the configuration asks for.
///
/// Progress goes to `out`; when `records` is given, each finished game is
/// appended to it as one JSON line.
pub fn run_session<S, R, W>(
    config: &Config,
    source: &mut S,
    rng: &mut R,
    out: &mut W,
    mut records: Option<&mut dyn Write>,
) -> Result<SessionStats, SessionError>
where
    S: BoardSource,
    R: Rng + ?Sized,
    W: Write,
{
    let game_config = config.game_config();
    let mut stats = SessionStats::default();

    while !config.games.is_exhausted(stats.games_played) {
        let number = stats.games_played + 1;
        let record = play_game(number, &game_config, source, rng, out)?;
        info!(
            "game {} finished: score {}, {} moves, max tile {}",
            number, record.score, record.moves, record.max_tile
        );

        if let Some(sink) = records.as_mut() {
            serde_json::to_writer(&mut **sink, &record)?;
            writeln!(sink)?;
        }

        if stats.record(&record) {
            writeln!(out, "score {} ({})", record.score, number)?;
            write!(out, "{}", record.board)?;
        } else if config.average
            && report_due(config.games, stats.games_played, config.report_interval)
        {
            writeln!(out, "avg.  {}", stats.average())?;
        }
        out.flush()?;
    }

    if let Some(sink) = records {
        sink.flush()?;
    }
    info!(
        "session finished: {} games, high score {}, average {}",
        stats.games_played,
        stats.high_score,
        stats.average()
    );
    Ok(stats)
}
