//! Remote board protocol.
//!
//! Board notation, the `:`-prefixed command set, and a TCP client that lets
//! a game be played on a board kept by a server.

pub mod client;
pub mod command;
pub mod notation;

pub use client::{ClientError, RemoteBoard, RemoteSource, DEFAULT_PORT};
pub use command::{parse_command, RemoteCommand};
pub use notation::{encode_notation, parse_notation, NotationError};
