//! Remote board tests against an in-process fake server.
//!
//! The fake server keeps its own board and RNG, answers `:board` with the
//! board notation and applies move commands the way a real server would.

use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use twenty48::board::Board;
use twenty48::config::{Config, GameCount};
use twenty48::eval::Strategy;
use twenty48::game::{play_game, GameConfig};
use twenty48::protocol::{encode_notation, parse_command, ClientError, RemoteCommand, RemoteSource};
use twenty48::session::{run_session, SessionError};

/// Accepts `connections` clients one after another. Each received line is
/// passed to `handler`; `None` closes the connection without replying.
/// The join handle yields every line received, in order.
fn serve<F>(connections: usize, mut handler: F) -> (String, JoinHandle<Vec<String>>)
where
    F: FnMut(&str) -> Option<String> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    let handle = thread::spawn(move || {
        let mut received = Vec::new();
        for _ in 0..connections {
            let (stream, _) = listener.accept().unwrap();
            let mut writer = stream.try_clone().unwrap();
            let reader = BufReader::new(stream);
            for line in reader.lines() {
                let Ok(line) = line else { break };
                received.push(line.clone());
                match handler(&line) {
                    Some(reply) => {
                        if writeln!(writer, "{}", reply).is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
        received
    });
    (address, handle)
}

/// A board server that plays by the usual rules.
struct FakeServer {
    board: Board,
    rng: SmallRng,
}

impl FakeServer {
    fn new(seed: u64) -> Self {
        FakeServer {
            board: Board::EMPTY,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn handle(&mut self, line: &str) -> Option<String> {
        match parse_command(line)? {
            RemoteCommand::Start => {
                self.board = Board::EMPTY;
                self.board.spawn_tile(&mut self.rng);
                self.board.spawn_tile(&mut self.rng);
                Some("ok".to_string())
            }
            RemoteCommand::Move(direction) => {
                if self.board.shift(direction).is_legal() {
                    self.board.spawn_tile(&mut self.rng);
                }
                Some("ok".to_string())
            }
            RemoteCommand::Board => Some(encode_notation(&self.board)),
            RemoteCommand::GameOver => Some("bye".to_string()),
        }
    }
}

fn is_move(line: &str) -> bool {
    matches!(parse_command(line), Some(RemoteCommand::Move(_)))
}

fn timeout() -> Option<Duration> {
    Some(Duration::from_secs(5))
}

#[test]
fn full_game_against_server() {
    let (address, handle) = {
        let mut server = FakeServer::new(17);
        serve(1, move |line| server.handle(line))
    };

    let mut source = RemoteSource::new(address.as_str(), timeout());
    let mut rng = SmallRng::seed_from_u64(1);
    let config = GameConfig {
        strategy: Strategy::Score,
        verbose: false,
    };
    let mut out = io::sink();
    let record = play_game(1, &config, &mut source, &mut rng, &mut out).unwrap();
    let received = handle.join().unwrap();

    assert!(record.board.is_stuck());
    assert!(record.score > 0);
    assert_eq!(record.moves as usize, received.iter().filter(|l| is_move(l)).count());

    assert_eq!(received[0], ":start");
    assert_eq!(received[1], ":board");
    assert_eq!(received.last().map(String::as_str), Some(":gameover"));
    // every move is followed by a board fetch
    for pair in received.windows(2) {
        if is_move(&pair[0]) {
            assert_eq!(pair[1], ":board");
        }
    }
}

#[test]
fn session_opens_one_connection_per_game() {
    let (address, handle) = {
        let mut server = FakeServer::new(4);
        serve(3, move |line| server.handle(line))
    };

    let config = Config {
        games: GameCount::Limited(3),
        strategy: Strategy::LeftRight,
        server: Some(address.clone()),
        timeout: timeout(),
        ..Config::default()
    };
    let mut source = RemoteSource::new(address.as_str(), config.timeout);
    let mut rng = SmallRng::seed_from_u64(2);
    let mut out: Vec<u8> = Vec::new();
    let stats = run_session(&config, &mut source, &mut rng, &mut out, None).unwrap();
    let received = handle.join().unwrap();

    assert_eq!(stats.games_played, 3);
    assert_eq!(received.iter().filter(|l| *l == ":start").count(), 3);
    assert_eq!(received.iter().filter(|l| *l == ":gameover").count(), 3);
    assert!(String::from_utf8(out).unwrap().starts_with("score "));
}

#[test]
fn server_closing_on_gameover_is_fine() {
    let (address, handle) = {
        let mut server = FakeServer::new(8);
        serve(1, move |line| {
            if line == ":gameover" {
                None
            } else {
                server.handle(line)
            }
        })
    };

    let mut source = RemoteSource::new(address.as_str(), timeout());
    let mut rng = SmallRng::seed_from_u64(3);
    let result = play_game(1, &GameConfig::default(), &mut source, &mut rng, &mut io::sink());
    handle.join().unwrap();
    assert!(result.is_ok());
}

#[test]
fn malformed_board_is_an_error() {
    let (address, handle) = serve(1, |line| match line {
        ":board" => Some("[[2 3 0 0] [0 0 0 0] [0 0 0 0] [0 0 0 0]]".to_string()),
        _ => Some("ok".to_string()),
    });

    let mut source = RemoteSource::new(address.as_str(), timeout());
    let mut rng = SmallRng::seed_from_u64(3);
    let err = play_game(1, &GameConfig::default(), &mut source, &mut rng, &mut io::sink()).unwrap_err();
    drop(source);
    handle.join().unwrap();
    assert!(matches!(err, SessionError::Remote(ClientError::Notation(_))), "got {:?}", err);
}

#[test]
fn empty_reply_is_an_error() {
    let (address, handle) = serve(1, |line| match line {
        ":start" => Some("ok".to_string()),
        _ => Some(String::new()),
    });

    let mut source = RemoteSource::new(address.as_str(), timeout());
    let mut rng = SmallRng::seed_from_u64(3);
    let err = play_game(1, &GameConfig::default(), &mut source, &mut rng, &mut io::sink()).unwrap_err();
    drop(source);
    handle.join().unwrap();
    assert!(
        matches!(err, SessionError::Remote(ClientError::EmptyReply(ref cmd)) if cmd == ":board"),
        "got {:?}",
        err
    );
}

#[test]
fn dropped_connection_is_an_error() {
    let (address, handle) = serve(1, |line| match line {
        ":start" => Some("ok".to_string()),
        _ => None,
    });

    let mut source = RemoteSource::new(address.as_str(), timeout());
    let mut rng = SmallRng::seed_from_u64(3);
    let err = play_game(1, &GameConfig::default(), &mut source, &mut rng, &mut io::sink()).unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, SessionError::Remote(ClientError::Closed)), "got {:?}", err);
}

#[test]
fn refused_connection_is_an_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut source = RemoteSource::new(format!("127.0.0.1:{}", port), timeout());
    let mut rng = SmallRng::seed_from_u64(3);
    let err = play_game(1, &GameConfig::default(), &mut source, &mut rng, &mut io::sink()).unwrap_err();
    assert!(matches!(err, SessionError::Remote(ClientError::Connect { .. })), "got {:?}", err);
}

#[test]
fn silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        // hold the connection open without answering
        thread::sleep(Duration::from_millis(600));
        drop(stream);
    });

    let mut source = RemoteSource::new(address.as_str(), Some(Duration::from_millis(100)));
    let mut rng = SmallRng::seed_from_u64(3);
    let err = play_game(1, &GameConfig::default(), &mut source, &mut rng, &mut io::sink()).unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, SessionError::Remote(ClientError::Io(_))), "got {:?}", err);
}
