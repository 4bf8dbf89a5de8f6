//! Single-game state machine and play loop.
//!
//! A `Game` owns its board and moves from `Idle` to `Playing` to `GameOver`.
//! Where the board comes from between turns is abstracted behind
//! `BoardSource`: locally the game simply keeps its own board, remotely the
//! server's copy is fetched before every turn.

use std::io::Write;

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::board::{Board, Direction};
use crate::eval::{Strategy, FIXED_ORDER};
use crate::search::best_move;
use crate::session::SessionError;

/// Lifecycle of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Playing,
    GameOver,
}

/// Per-game settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameConfig {
    pub strategy: Strategy,
    /// Print the board before every turn.
    pub verbose: bool,
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    score: u64,
    moves: u32,
    last_move: Option<Direction>,
    phase: GamePhase,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates an idle game with an empty board.
    pub fn new() -> Self {
        Game {
            board: Board::EMPTY,
            score: 0,
            moves: 0,
            last_move: None,
            phase: GamePhase::Idle,
        }
    }

    /// Creates a game already in play on the given board.
    pub fn from_board(board: Board) -> Self {
        Game {
            board,
            phase: GamePhase::Playing,
            ..Game::new()
        }
    }

    /// Clears the board, drops two tiles and starts playing.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Game::new();
        self.board.spawn_tile(rng);
        self.board.spawn_tile(rng);
        self.phase = GamePhase::Playing;
    }

    /// Replaces the board with one received from elsewhere, keeping the
    /// score and move count.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Playing;
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// The last direction that changed the board.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Plays one turn. Returns the direction played, or `None` once no
    /// direction changes the board and the game is over.
    ///
    /// The fixed-order player tries up, left, right, down. The evaluating
    /// players ask the one-ply search and fall back to the fixed order when
    /// it finds nothing.
    pub fn step<R: Rng + ?Sized>(&mut self, strategy: Strategy, rng: &mut R) -> Option<Direction> {
        if self.phase != GamePhase::Playing {
            return None;
        }

        let mut played = None;
        if let Some(scorer) = strategy.scorer() {
            if let Some(evaluation) = best_move(&self.board, scorer) {
                played = self.try_move(evaluation.direction, rng);
            }
        }
        if played.is_none() {
            for &direction in FIXED_ORDER.iter() {
                played = self.try_move(direction, rng);
                if played.is_some() {
                    break;
                }
            }
        }

        if played.is_none() {
            debug!("game over after {} moves, score {}", self.moves, self.score);
            self.phase = GamePhase::GameOver;
        }
        played
    }

    /// Applies `direction` if it changes the board, then spawns a tile.
    fn try_move<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> Option<Direction> {
        let outcome = self.board.shift(direction);
        if !outcome.is_legal() {
            return None;
        }

        self.score += outcome.score as u64;
        self.moves += 1;
        self.last_move = Some(direction);
        if self.board.spawn_tile(rng) == 0 {
            self.phase = GamePhase::GameOver;
        }
        Some(direction)
    }
}

/// Where a game's board lives between turns.
pub trait BoardSource {
    /// Puts `game` into play.
    fn begin<R: Rng + ?Sized>(&mut self, game: &mut Game, rng: &mut R) -> Result<(), SessionError>;

    /// Brings `game`'s board up to date before a turn.
    fn sync(&mut self, game: &mut Game) -> Result<(), SessionError>;

    /// Called once the game is over.
    fn finish(&mut self, game: &Game) -> Result<(), SessionError>;
}

/// A purely local board.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBoard;

impl BoardSource for LocalBoard {
    fn begin<R: Rng + ?Sized>(&mut self, game: &mut Game, rng: &mut R) -> Result<(), SessionError> {
        game.start(rng);
        Ok(())
    }

    fn sync(&mut self, _game: &mut Game) -> Result<(), SessionError> {
        Ok(())
    }

    fn finish(&mut self, _game: &Game) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Sequential game number, starting at 1.
    pub game: u64,
    pub strategy: Strategy,
    pub score: u64,
    pub moves: u32,
    pub max_tile: u32,
    pub board: Board,
}

impl GameRecord {
    pub fn from_game(number: u64, strategy: Strategy, game: &Game) -> Self {
        GameRecord {
            game: number,
            strategy,
            score: game.score(),
            moves: game.moves(),
            max_tile: game.board().max_tile(),
            board: *game.board(),
        }
    }
}

/// Plays one game to completion.
pub fn play_game<S, R, W>(
    number: u64,
    config: &GameConfig,
    source: &mut S,
    rng: &mut R,
    out: &mut W,
) -> Result<GameRecord, SessionError>
where
    S: BoardSource,
    R: Rng + ?Sized,
    W: Write,
{
    let mut game = Game::new();
    source.begin(&mut game, rng)?;

    loop {
        source.sync(&mut game)?;
        if config.verbose {
            write!(out, "{}", game.board())?;
        }

        match game.step(config.strategy, rng) {
            Some(direction) => {
                debug!("move {}", direction);
                if config.verbose && config.strategy.scorer().is_some() {
                    writeln!(out, "move {}", direction)?;
                }
            }
            None => break,
        }
    }

    source.finish(&game)?;
    Ok(GameRecord::from_game(number, config.strategy, &game))
}
