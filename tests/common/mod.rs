//! A scripted engine for driving a `Session` without a real process. It
//! answers the handshake, readiness barriers, `d` dumps, and `go` commands
//! from a small transition table, and records every line the session sends
//! so ordering invariants can be asserted.

// Not every test binary exercises the whole mock.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use remora::{Channel, EngineError, Result, STARTPOS_FEN};

pub struct ScriptedEngine {
    /// Every line the session has sent, in order.
    pub sent: Vec<String>,
    queue: VecDeque<String>,
    fen: String,
    /// (fen, move) -> resulting fen; a move is legal iff it has an entry.
    transitions: HashMap<(String, String), String>,
    /// Staged line sets for upcoming non-searchmoves `go` commands.
    staged_go: VecDeque<Vec<String>>,
    staged_perft: VecDeque<Vec<String>>,
    staged_eval: VecDeque<Vec<String>>,
    wdl: bool,
    alive: bool,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            queue: VecDeque::new(),
            fen: STARTPOS_FEN.to_string(),
            transitions: HashMap::new(),
            staged_go: VecDeque::new(),
            staged_perft: VecDeque::new(),
            staged_eval: VecDeque::new(),
            wdl: false,
            alive: true,
        }
    }

    pub fn with_wdl() -> Self {
        let mut engine = Self::new();
        engine.wdl = true;
        engine
    }

    /// Registers `mv` as legal in `from`, leading to `to`.
    pub fn allow_move(&mut self, from: &str, mv: &str, to: &str) {
        self.transitions
            .insert((from.to_string(), mv.to_string()), to.to_string());
    }

    /// Queues the full line set (including the `bestmove` line) for the
    /// next plain `go` command.
    pub fn stage_go(&mut self, lines: &[&str]) {
        self.staged_go
            .push_back(lines.iter().map(|s| s.to_string()).collect());
    }

    pub fn stage_perft(&mut self, lines: &[&str]) {
        self.staged_perft
            .push_back(lines.iter().map(|s| s.to_string()).collect());
    }

    pub fn stage_eval(&mut self, lines: &[&str]) {
        self.staged_eval
            .push_back(lines.iter().map(|s| s.to_string()).collect());
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    fn respond(&mut self, lines: Vec<String>) {
        self.queue.extend(lines);
    }

    fn respond_board_dump(&mut self) {
        let mut lines = board_grid(&self.fen);
        lines.push("  a   b   c   d   e   f   g   h".to_string());
        lines.push(String::new());
        lines.push(format!("Fen: {}", self.fen));
        lines.push("Key: 8F8F01D4562F59FB".to_string());
        lines.push("Checkers: ".to_string());
        self.respond(lines);
    }

    fn respond_go(&mut self, command: &str) {
        if let Some(lines) = self.staged_go.pop_front() {
            self.respond(lines);
            return;
        }
        // Default reply: one final-iteration info line and a bestmove.
        let depth: u32 = command
            .strip_prefix("go depth ")
            .and_then(|d| d.parse().ok())
            .unwrap_or(15);
        let mv = self
            .transitions
            .keys()
            .find(|(f, _)| *f == self.fen)
            .map(|(_, m)| m.clone())
            .unwrap_or_else(|| "e2e4".to_string());
        self.respond(vec![
            format!(
                "info depth {} seldepth {} multipv 1 score cp 20 nodes 5000 nps 100000 time 50 pv {}",
                depth,
                depth + 4,
                mv
            ),
            format!("bestmove {}", mv),
        ]);
    }

    fn respond_searchmoves(&mut self, mv: &str) {
        let key = (self.fen.clone(), mv.to_string());
        if self.transitions.contains_key(&key) {
            self.respond(vec![
                format!("info depth 1 seldepth 1 multipv 1 score cp 10 nodes 20 pv {}", mv),
                format!("bestmove {}", mv),
            ]);
        } else {
            self.respond(vec![
                "info depth 0 score mate 0".to_string(),
                "bestmove (none)".to_string(),
            ]);
        }
    }
}

impl Channel for ScriptedEngine {
    fn send(&mut self, line: &str) -> Result<()> {
        if !self.alive {
            return Ok(());
        }
        self.sent.push(line.to_string());
        if line == "uci" {
            let mut lines = vec![
                "id name Stockfish 16".to_string(),
                "id author the Stockfish developers (see AUTHORS file)".to_string(),
                "option name Threads type spin default 1 min 1 max 1024".to_string(),
                "option name Hash type spin default 16 min 1 max 33554432".to_string(),
                "option name MultiPV type spin default 1 min 1 max 500".to_string(),
            ];
            if self.wdl {
                lines.push("option name UCI_ShowWDL type check default false".to_string());
            }
            lines.push("uciok".to_string());
            self.respond(lines);
        } else if line == "isready" {
            self.respond(vec!["readyok".to_string()]);
        } else if line == "quit" {
            self.alive = false;
        } else if let Some(rest) = line.strip_prefix("position fen ") {
            match rest.split_once(" moves ") {
                None => self.fen = rest.to_string(),
                Some((fen, moves)) => {
                    let mut fen = fen.to_string();
                    for mv in moves.split_whitespace() {
                        let key = (fen.clone(), mv.to_string());
                        if let Some(next) = self.transitions.get(&key) {
                            fen = next.clone();
                        }
                    }
                    self.fen = fen;
                }
            }
        } else if line == "d" {
            self.respond_board_dump();
        } else if let Some(mv) = line.strip_prefix("go depth 1 searchmoves ") {
            let mv = mv.to_string();
            self.respond_searchmoves(&mv);
        } else if line.starts_with("go perft ") {
            let lines = self
                .staged_perft
                .pop_front()
                .expect("no perft output staged");
            self.respond(lines);
        } else if line == "eval" {
            let lines = self.staged_eval.pop_front().expect("no eval output staged");
            self.respond(lines);
        } else if line.starts_with("go") {
            let command = line.to_string();
            self.respond_go(&command);
        }
        // setoption, ucinewgame, flip: consumed silently.
        Ok(())
    }

    fn receive_line(&mut self) -> Result<String> {
        self.queue.pop_front().ok_or(EngineError::EngineCrashed)
    }

    fn is_alive(&mut self) -> bool {
        self.alive
    }

    fn shutdown(&mut self) {
        self.alive = false;
    }
}

/// Renders the 17-line board grid of a `d` dump from a FEN's board field.
pub fn board_grid(fen: &str) -> Vec<String> {
    let board = fen.split_whitespace().next().unwrap_or("");
    let border = "+---+---+---+---+---+---+---+---+".to_string();
    let mut lines = vec![border.clone()];
    for (i, rank) in board.split('/').enumerate() {
        let mut row = String::from("|");
        for c in rank.chars() {
            if let Some(d) = c.to_digit(10) {
                for _ in 0..d {
                    row.push_str("   |");
                }
            } else {
                row.push_str(&format!(" {} |", c));
            }
        }
        row.push_str(&format!(" {}", 8 - i));
        lines.push(row);
        lines.push(border.clone());
    }
    lines
}

/// Index of the first element of `sent` equal to `line`, at or after `from`.
pub fn sent_index(sent: &[String], from: usize, line: &str) -> Option<usize> {
    sent.iter()
        .enumerate()
        .skip(from)
        .find(|(_, l)| l.as_str() == line)
        .map(|(i, _)| i)
}
