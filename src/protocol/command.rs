//! Remote board commands.
//!
//! Every command travels as a single line starting with `:`. The server
//! answers each one with a single line; for `:board` that line is the board
//! notation.

use crate::board::Direction;

/// A client-to-server command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Begin a new game on the server.
    Start,

    /// Slide the server's board.
    Move(Direction),

    /// Request the current board notation.
    Board,

    /// End the session.
    GameOver,
}

impl RemoteCommand {
    /// Returns the command word without the `:` prefix.
    pub fn word(&self) -> &'static str {
        match self {
            RemoteCommand::Start => "start",
            RemoteCommand::Move(d) => d.name(),
            RemoteCommand::Board => "board",
            RemoteCommand::GameOver => "gameover",
        }
    }

    /// Returns the command as sent on the wire, without the line terminator.
    pub fn to_wire(&self) -> String {
        format!(":{}", self.word())
    }
}

/// Parses one line received by a server.
///
/// Returns `None` for blank lines, lines without the `:` prefix, and unknown
/// command words.
pub fn parse_command(line: &str) -> Option<RemoteCommand> {
    let word = line.trim().strip_prefix(':')?;
    match word {
        "start" => Some(RemoteCommand::Start),
        "board" => Some(RemoteCommand::Board),
        "gameover" => Some(RemoteCommand::GameOver),
        other => Direction::from_name(other).map(RemoteCommand::Move),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ALL_DIRECTIONS;

    #[test]
    fn wire_format_has_colon_prefix() {
        assert_eq!(RemoteCommand::Start.to_wire(), ":start");
        assert_eq!(RemoteCommand::Board.to_wire(), ":board");
        assert_eq!(RemoteCommand::GameOver.to_wire(), ":gameover");
        assert_eq!(RemoteCommand::Move(Direction::Down).to_wire(), ":down");
    }

    #[test]
    fn parse_every_move() {
        for d in ALL_DIRECTIONS {
            let line = RemoteCommand::Move(d).to_wire();
            assert_eq!(parse_command(&line), Some(RemoteCommand::Move(d)));
        }
    }

    #[test]
    fn parse_tolerates_line_endings() {
        assert_eq!(parse_command(":board\r\n"), Some(RemoteCommand::Board));
        assert_eq!(parse_command("  :start"), Some(RemoteCommand::Start));
    }

    #[test]
    fn parse_rejects_unknown_input() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("board"), None);
        assert_eq!(parse_command(":diagonal"), None);
        assert_eq!(parse_command(":"), None);
    }
}
