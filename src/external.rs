use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use crate::moves::Move;
use crate::player::Player;
use crate::Error;

/// A player backed by an external program, speaking a line protocol over
/// stdin/stdout: the child writes `HELLO` on start, then for every prompt
/// `<drawn_tiles>:<opponent_move_or_empty>` answers with one move line in
/// coordinate notation.
///
/// End of stream, a missing handshake or a malformed move line become
/// [`Error::ExternalPlayer`] / parse errors, which the referee records
/// against this player and which end the game.
#[derive(Debug)]
pub struct ExternalPlayer {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl ExternalPlayer {
    /// Spawn `command` with piped stdio and wait for its `HELLO` line.
    pub fn spawn(command: &mut Command) -> Result<ExternalPlayer, Error> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| Error::ExternalPlayer(format!("spawn failed: {}", e)))?;
        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or_else(|| Error::ExternalPlayer("no stdout".to_string()))?;
        let mut player = ExternalPlayer {
            child,
            stdin,
            stdout,
        };
        match player.read_line()? {
            Some(ref line) if line == "HELLO" => Ok(player),
            _ => Err(Error::ExternalPlayer("no HELLO".to_string())),
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();
        let n = self
            .stdout
            .read_line(&mut line)
            .map_err(|e| Error::ExternalPlayer(format!("read failed: {}", e)))?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end().to_string()))
    }
}

impl Player for ExternalPlayer {
    fn play(&mut self, drawn: &[char], opponent_move: Option<&Move>) -> Result<Move, Error> {
        let tiles: String = drawn.iter().collect();
        let last = opponent_move.map(|m| m.to_string()).unwrap_or_default();
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| Error::ExternalPlayer("stdin closed".to_string()))?;
        writeln!(stdin, "{}:{}", tiles, last)
            .and_then(|_| stdin.flush())
            .map_err(|e| Error::ExternalPlayer(format!("write failed: {}", e)))?;
        match self.read_line()? {
            Some(line) => line.parse(),
            None => Err(Error::ExternalPlayer("no move".to_string())),
        }
    }
}

impl Drop for ExternalPlayer {
    fn drop(&mut self) {
        // Closing stdin signals the child to exit; reap it so no zombie is
        // left behind.
        drop(self.stdin.take());
        let _ = self.child.wait();
    }
}
