//! Remote board client.
//!
//! Talks to a 2048 server over TCP. Each command is one `\n`-terminated line
//! and each reply is read up to the next `\n`, so short reads never split a
//! message. A read timeout turns a silent peer into an error instead of a
//! hang.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use crate::board::{Board, Direction};
use crate::game::{BoardSource, Game};
use crate::session::SessionError;

use super::command::RemoteCommand;
use super::notation::{parse_notation, NotationError};

/// Port used when the server address does not name one.
pub const DEFAULT_PORT: u16 = 2048;

/// Errors talking to the remote board.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server address '{0}'")]
    Address(String),

    #[error("cannot connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("server closed the connection")]
    Closed,

    #[error("empty reply to {0}")]
    EmptyReply(String),

    #[error("malformed board: {0}")]
    Notation(#[from] NotationError),

    #[error("no open connection")]
    NotConnected,
}

/// Resolves `host`, `host:port` or a bare IP address.
pub fn resolve(address: &str) -> Result<Vec<SocketAddr>, ClientError> {
    if let Ok(ip) = address.parse::<IpAddr>() {
        return Ok(vec![SocketAddr::new(ip, DEFAULT_PORT)]);
    }
    let with_port = if address.contains(':') {
        address.to_string()
    } else {
        format!("{}:{}", address, DEFAULT_PORT)
    };
    let addrs: Vec<SocketAddr> = with_port
        .to_socket_addrs()
        .map_err(|_| ClientError::Address(address.to_string()))?
        .collect();
    if addrs.is_empty() {
        return Err(ClientError::Address(address.to_string()));
    }
    Ok(addrs)
}

/// One open connection to a board server.
pub struct RemoteBoard {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl RemoteBoard {
    /// Connects to `address`, applying `timeout` to the connect attempt and
    /// to every later read and write.
    pub fn connect(address: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let addrs = resolve(address)?;
        let connect_err = |source: io::Error| ClientError::Connect {
            address: address.to_string(),
            source,
        };

        let stream = match timeout {
            Some(t) => {
                let mut last = io::Error::new(io::ErrorKind::NotFound, "no address");
                let mut stream = None;
                for addr in &addrs {
                    match TcpStream::connect_timeout(addr, t) {
                        Ok(s) => {
                            stream = Some(s);
                            break;
                        }
                        Err(e) => last = e,
                    }
                }
                stream.ok_or_else(|| connect_err(last))?
            }
            None => TcpStream::connect(&addrs[..]).map_err(connect_err)?,
        };

        stream.set_read_timeout(timeout)?;
        stream.set_write_timeout(timeout)?;
        stream.set_nodelay(true)?;
        info!("connected to {}", address);

        let writer = stream.try_clone()?;
        Ok(RemoteBoard {
            reader: BufReader::new(stream),
            writer,
        })
    }

    /// Sends one command and returns the server's reply line.
    pub fn send(&mut self, command: RemoteCommand) -> Result<String, ClientError> {
        let wire = command.to_wire();
        debug!("send {}", wire);
        self.writer.write_all(wire.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ClientError::Closed);
        }
        let reply = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if reply.is_empty() {
            return Err(ClientError::EmptyReply(wire));
        }
        debug!("recv {}", reply);
        Ok(reply.to_string())
    }

    /// Fetches and parses the server's board.
    pub fn fetch_board(&mut self) -> Result<Board, ClientError> {
        let reply = self.send(RemoteCommand::Board)?;
        Ok(parse_notation(&reply)?)
    }

    /// Asks the server to slide its board.
    pub fn play(&mut self, direction: Direction) -> Result<(), ClientError> {
        self.send(RemoteCommand::Move(direction)).map(|_| ())
    }
}

/// A board kept by a remote server, one connection per game.
pub struct RemoteSource {
    address: String,
    timeout: Option<Duration>,
    conn: Option<RemoteBoard>,
}

impl RemoteSource {
    pub fn new(address: impl Into<String>, timeout: Option<Duration>) -> Self {
        RemoteSource {
            address: address.into(),
            timeout,
            conn: None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl BoardSource for RemoteSource {
    fn begin<R: Rng + ?Sized>(&mut self, game: &mut Game, _rng: &mut R) -> Result<(), SessionError> {
        let mut conn = RemoteBoard::connect(&self.address, self.timeout)?;
        conn.send(RemoteCommand::Start)?;
        *game = Game::new();
        self.conn = Some(conn);
        Ok(())
    }

    /// Replays the last local move on the server, then adopts its board.
    fn sync(&mut self, game: &mut Game) -> Result<(), SessionError> {
        let conn = self.conn.as_mut().ok_or(ClientError::NotConnected)?;
        if let Some(direction) = game.last_move() {
            conn.play(direction)?;
        }
        let board = conn.fetch_board()?;
        game.set_board(board);
        Ok(())
    }

    fn finish(&mut self, _game: &Game) -> Result<(), SessionError> {
        let Some(mut conn) = self.conn.take() else {
            return Ok(());
        };
        match conn.send(RemoteCommand::GameOver) {
            Ok(_) | Err(ClientError::Closed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
