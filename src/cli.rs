//! Command-line parsing.
//!
//! Arguments are consumed from the right. A flag that takes a value is
//! recognised by looking one argument further left, so `--server host`
//! is seen as `host` preceded by `--server`. When a flag repeats, or two
//! strategy flags compete, the rightmost one wins.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::config::{Config, GameCount};
use crate::eval::Strategy;

/// Reasons the command line was rejected. Each carries the exit status,
/// which is the number of arguments left unparsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("help requested")]
    Help { status: i32 },

    #[error("unknown option {option}")]
    UnknownOption { option: String, status: i32 },

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue {
        flag: String,
        value: String,
        status: i32,
    },
}

impl CliError {
    pub fn exit_status(&self) -> i32 {
        match self {
            CliError::Help { status }
            | CliError::UnknownOption { status, .. }
            | CliError::InvalidValue { status, .. } => *status,
        }
    }
}

/// Returns the file name of `arg0`, for messages.
pub fn program_name(arg0: Option<&str>) -> String {
    arg0.and_then(|a| Path::new(a).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("twenty48")
        .to_string()
}

/// Returns the one-line usage summary.
pub fn usage(program: &str) -> String {
    format!(
        "usage: {} [--average] [--highscore] [--games <n>] [--lr|--score|--up] \
         [--record <file>] [--seed <n>] [--server <address>] [--timeout <ms>] [-v]",
        program
    )
}

fn parse_number(flag: &str, value: &str, end: usize) -> Result<u64, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
        status: (end - 1) as i32,
    })
}

fn reject(arg: &str, end: usize) -> CliError {
    if arg == "-h" {
        CliError::Help {
            status: (end - 2) as i32,
        }
    } else {
        CliError::UnknownOption {
            option: arg.to_string(),
            status: (end - 1) as i32,
        }
    }
}

/// Parses the full argument vector, program name included.
pub fn parse_args(args: &[String]) -> Result<Config, CliError> {
    let mut verbose = false;
    let mut average = false;
    let mut games: Option<GameCount> = None;
    let mut strategy: Option<Strategy> = None;
    let mut server: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut record: Option<PathBuf> = None;
    let mut timeout: Option<Option<Duration>> = None;

    let mut end = args.len();
    while end > 1 {
        let arg = args[end - 1].as_str();
        let consumed = match arg {
            "-v" => {
                verbose = true;
                1
            }
            "--average" => {
                average = true;
                1
            }
            "--highscore" => {
                games.get_or_insert(GameCount::Unbounded);
                1
            }
            "--up" => {
                strategy.get_or_insert(Strategy::Up);
                1
            }
            "--score" => {
                strategy.get_or_insert(Strategy::Score);
                1
            }
            "--lr" => {
                strategy.get_or_insert(Strategy::LeftRight);
                1
            }
            _ if end > 2 => {
                let flag = args[end - 2].as_str();
                match flag {
                    "--server" => {
                        server.get_or_insert_with(|| arg.to_string());
                    }
                    "--games" => {
                        let n = parse_number(flag, arg, end)?;
                        games.get_or_insert(GameCount::Limited(n));
                    }
                    "--seed" => {
                        let n = parse_number(flag, arg, end)?;
                        seed.get_or_insert(n);
                    }
                    "--record" => {
                        record.get_or_insert_with(|| PathBuf::from(arg));
                    }
                    "--timeout" => {
                        let ms = parse_number(flag, arg, end)?;
                        let t = (ms > 0).then(|| Duration::from_millis(ms));
                        timeout.get_or_insert(t);
                    }
                    _ => return Err(reject(arg, end)),
                }
                2
            }
            _ => return Err(reject(arg, end)),
        };
        end -= consumed;
    }

    let defaults = Config::default();
    Ok(Config {
        verbose,
        average,
        games: games.unwrap_or(defaults.games),
        strategy: strategy.unwrap_or(defaults.strategy),
        server,
        seed,
        record,
        timeout: timeout.unwrap_or(defaults.timeout),
        report_interval: defaults.report_interval,
    })
}
