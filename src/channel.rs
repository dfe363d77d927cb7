use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use log::{info, trace};

use crate::error::{EngineError, Result};

/// A duplex line channel to an engine. One command goes out per `send`;
/// responses arrive as arbitrarily many lines via `receive_line`. The
/// session drives this synchronously, so no buffering beyond line framing
/// is needed.
pub trait Channel {
    fn send(&mut self, line: &str) -> Result<()>;
    fn receive_line(&mut self) -> Result<String>;
    fn is_alive(&mut self) -> bool;
    /// Terminates the peer. Blocks until it has exited; idempotent.
    fn shutdown(&mut self);
}

/// Channel backed by a spawned engine process with piped stdin/stdout.
pub struct EngineProcess {
    path: PathBuf,
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    quit_sent: bool,
    debug_view: bool,
}

impl EngineProcess {
    pub fn spawn(path: &Path, debug_view: bool) -> Result<Self> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;
        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or(EngineError::ChannelBroken)?;
        Ok(Self {
            path: path.to_path_buf(),
            child,
            stdin,
            stdout,
            quit_sent: false,
            debug_view,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_debug_view(&mut self, on: bool) {
        self.debug_view = on;
    }

    fn echo(&self, text: &str) {
        if self.debug_view {
            info!(target: "remora::uci", "{}", text);
        } else {
            trace!(target: "remora::uci", "{}", text);
        }
    }

    fn exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)) | Err(_))
    }
}

impl Channel for EngineProcess {
    fn send(&mut self, line: &str) -> Result<()> {
        if self.stdin.is_none() {
            return Err(EngineError::ChannelBroken);
        }
        // Once the process has exited or quit was issued, further commands
        // are dropped silently; the protocol has nothing left to say.
        if self.quit_sent || matches!(self.child.try_wait(), Ok(Some(_))) {
            return Ok(());
        }
        self.echo(&format!(">>> {}", line));
        let stdin = self.stdin.as_mut().ok_or(EngineError::ChannelBroken)?;
        writeln!(stdin, "{}", line)?;
        stdin.flush()?;
        if line == "quit" {
            self.quit_sent = true;
        }
        Ok(())
    }

    fn receive_line(&mut self) -> Result<String> {
        if self.exited() {
            return Err(EngineError::EngineCrashed);
        }
        let mut line = String::new();
        let n = self.stdout.read_line(&mut line)?;
        if n == 0 {
            return Err(EngineError::EngineCrashed);
        }
        let line = line.trim().to_string();
        self.echo(&line);
        Ok(line)
    }

    fn is_alive(&mut self) -> bool {
        !self.exited()
    }

    fn shutdown(&mut self) {
        if self.is_alive() {
            let _ = self.send("quit");
        }
        let _ = self.child.wait();
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        self.shutdown();
    }
}
