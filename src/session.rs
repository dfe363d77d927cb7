use std::collections::BTreeMap;
use std::path::Path;

use log::warn;

use crate::channel::{Channel, EngineProcess};
use crate::error::{EngineError, Result};
use crate::fen;
use crate::params::{self, ParamValue};
use crate::parse;
use crate::types::{BenchmarkParams, Capture, Evaluation, Perft, Piece, SearchTarget, TopMove, Wdl};
use crate::version::{parse_version, EngineVersion};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Knobs for a new session. `parameters` are engine options layered over
/// the defaults during the construction handshake.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub depth: u32,
    pub num_nodes: u64,
    /// Whether evaluations are reported relative to the side to move (the
    /// engine's native convention) or always relative to white.
    pub turn_perspective: bool,
    pub debug_view: bool,
    pub parameters: Vec<(String, ParamValue)>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            depth: 15,
            num_nodes: 1_000_000,
            turn_perspective: true,
            debug_view: false,
            parameters: Vec::new(),
        }
    }
}

/// One collected `d` dump: the 17-line board grid, the optional file
/// legend (newer engine builds only), and the FEN the engine holds.
struct BoardDump {
    grid: Vec<String>,
    legend: Option<String>,
    fen: String,
}

/// A synchronous UCI session over one engine process. Exactly one command
/// is in flight at a time; every public operation blocks until its
/// response has been fully drained. Dropping the session sends `quit` and
/// waits for the process to exit.
pub struct Session<C: Channel> {
    channel: C,
    parameters: BTreeMap<String, ParamValue>,
    depth: u32,
    num_nodes: u64,
    turn_perspective: bool,
    info: String,
    version: EngineVersion,
    wdl_supported: bool,
}

impl Session<EngineProcess> {
    /// Spawns the engine at `path` and runs the full construction
    /// handshake: version identification, WDL capability probe, default
    /// plus caller parameters, and a fresh game.
    pub fn spawn(path: impl AsRef<Path>, config: SessionConfig) -> Result<Self> {
        let channel = EngineProcess::spawn(path.as_ref(), config.debug_view)?;
        Self::over(channel, config)
    }

    /// Checks whether `candidate` denotes a valid position. Runs the pure
    /// syntactic check first, then asks a disposable single-purpose engine
    /// process (1 MB hash) to search the position shallowly; a crash of
    /// that process means the position is illegal, not that this call
    /// failed. The probe process is torn down on every exit path.
    pub fn is_fen_valid(&mut self, candidate: &str) -> Result<bool> {
        if !fen::is_syntax_valid(candidate) {
            return Ok(false);
        }
        let path = self.channel.path().to_path_buf();
        let verdict = (|| -> Result<bool> {
            let config = SessionConfig {
                parameters: vec![("Hash".to_string(), ParamValue::Int(1))],
                ..SessionConfig::default()
            };
            let mut probe = Session::spawn(&path, config)?;
            probe.set_fen_position(candidate, false)?;
            probe.put("go depth 10")?;
            Ok(probe.finish_best_move()?.is_some())
        })();
        match verdict {
            Ok(legal) => Ok(legal),
            Err(EngineError::EngineCrashed) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<C: Channel> Session<C> {
    /// Builds a session over an already-open channel. This is the seam the
    /// scripted-channel tests use; process-backed callers go through
    /// [`Session::spawn`].
    pub fn over(channel: C, config: SessionConfig) -> Result<Self> {
        if config.depth == 0 {
            return Err(EngineError::InvalidArgument(
                "depth must be a positive integer".to_string(),
            ));
        }
        if config.num_nodes == 0 {
            return Err(EngineError::InvalidArgument(
                "node budget must be a positive integer".to_string(),
            ));
        }
        let mut session = Self {
            channel,
            parameters: BTreeMap::new(),
            depth: config.depth,
            num_nodes: config.num_nodes,
            turn_perspective: config.turn_perspective,
            info: String::new(),
            version: EngineVersion::default(),
            wdl_supported: false,
        };
        session.handshake()?;
        session.update_parameters(params::default_parameters())?;
        session.update_parameters(config.parameters)?;
        if session.wdl_supported {
            // Switched on when available, but never recorded in the
            // parameter map; it is a capability, not caller configuration.
            session.raw_set_option("UCI_ShowWDL", &ParamValue::Bool(true))?;
            session.ensure_ready()?;
        }
        session.prepare_new_position(true)?;
        Ok(session)
    }

    /// One pass over the engine's `uci` listing: the `id name` line yields
    /// the version token, and the option listing tells us whether this
    /// build can report WDL statistics. Both are cached for the session's
    /// lifetime.
    fn handshake(&mut self) -> Result<()> {
        self.put("uci")?;
        let mut version_token = None;
        loop {
            let line = self.read_line()?;
            if line == "uciok" {
                break;
            }
            if line.starts_with("id name") {
                version_token = line.split_whitespace().nth(3).map(str::to_string);
            } else if line.split_whitespace().any(|t| t == "UCI_ShowWDL") {
                self.wdl_supported = true;
            }
        }
        let token = version_token
            .ok_or_else(|| EngineError::Protocol("engine never identified itself".to_string()))?;
        self.version = parse_version(&token)?;
        Ok(())
    }

    // ---- protocol primitives ----

    fn put(&mut self, command: &str) -> Result<()> {
        self.channel.send(command)
    }

    fn read_line(&mut self) -> Result<String> {
        self.channel.receive_line()
    }

    fn discard_until(&mut self, needle: &str) -> Result<()> {
        while !self.read_line()?.contains(needle) {}
        Ok(())
    }

    /// The synchronization barrier: after this returns, every previously
    /// issued command has been fully absorbed by the engine.
    fn ensure_ready(&mut self) -> Result<()> {
        self.put("isready")?;
        while self.read_line()? != "readyok" {}
        Ok(())
    }

    /// Reads the output of an in-flight `go`, up to and including the
    /// terminating `bestmove` line.
    fn drain_search(&mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            lines.push(self.read_line()?);
            if lines[lines.len() - 1].starts_with("bestmove") {
                return Ok(lines);
            }
        }
    }

    fn finish_best_move(&mut self) -> Result<Option<String>> {
        let lines = self.drain_search()?;
        self.info = parse::diagnostic_line(&lines);
        parse::best_move(&lines)
    }

    fn prepare_new_position(&mut self, new_game: bool) -> Result<()> {
        if new_game {
            self.put("ucinewgame")?;
        }
        self.ensure_ready()?;
        self.info.clear();
        Ok(())
    }

    fn raw_set_option(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        params::validate(name, value)?;
        self.put(&format!("setoption name {} value {}", name, value))
    }

    /// Applies one option and barriers immediately. Batch updates go
    /// through [`Session::update_parameters`] instead, which barriers once
    /// for the whole batch.
    fn set_option(&mut self, name: &str, value: ParamValue) -> Result<()> {
        self.raw_set_option(name, &value)?;
        self.parameters.insert(name.to_string(), value);
        self.ensure_ready()
    }

    // ---- configuration ----

    /// Applies a batch of engine options atomically: everything is
    /// validated before anything is sent, `UCI_LimitStrength` is
    /// auto-toggled when exactly one of Skill Level / UCI_Elo appears
    /// without it, `Threads` goes out strictly before `Hash` (with `Hash`
    /// re-sent whenever `Threads` changes), and the batch ends with a
    /// single readiness barrier plus a position refresh so the options
    /// take effect.
    pub fn update_parameters<I, K, V>(&mut self, batch: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let mut batch: Vec<(String, ParamValue)> = batch
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if batch.is_empty() {
            return Ok(());
        }
        for (name, value) in &batch {
            if !self.parameters.is_empty() && !self.parameters.contains_key(name) {
                return Err(EngineError::UnknownParameter(name.clone()));
            }
            params::validate(name, value)?;
        }

        let has = |batch: &[(String, ParamValue)], name: &str| {
            batch.iter().any(|(k, _)| k == name)
        };
        if has(&batch, "Skill Level") != has(&batch, "UCI_Elo")
            && !has(&batch, "UCI_LimitStrength")
        {
            // Setting a skill level means playing by level, setting a
            // rating means playing by rating; keep the flag consistent
            // unless the caller pinned it explicitly.
            let by_rating = has(&batch, "UCI_Elo");
            batch.push(("UCI_LimitStrength".to_string(), ParamValue::Bool(by_rating)));
        }

        if let Some(pos) = batch.iter().position(|(k, _)| k == "Threads") {
            // The engine recommends setting Threads before Hash; move both
            // to the end of the batch in that order, falling back to the
            // current Hash value when the batch doesn't carry one.
            let threads = batch.remove(pos);
            let hash = match batch.iter().position(|(k, _)| k == "Hash") {
                Some(p) => batch.remove(p),
                None => (
                    "Hash".to_string(),
                    self.parameters
                        .get("Hash")
                        .cloned()
                        .unwrap_or(ParamValue::Int(16)),
                ),
            };
            batch.push(threads);
            batch.push(hash);
        }

        for (name, value) in batch {
            self.raw_set_option(&name, &value)?;
            self.parameters.insert(name, value);
        }
        self.ensure_ready()?;

        // Some engines only pick up new option values once the position is
        // resent; same FEN, no new-game reset.
        let fen = self.get_fen_position()?;
        self.set_fen_position(&fen, false)
    }

    /// Resets every engine option back to its default.
    pub fn reset_parameters(&mut self) -> Result<()> {
        self.update_parameters(params::default_parameters())
    }

    /// Limits the engine's strength by skill level (0..=20).
    pub fn set_skill_level(&mut self, level: i64) -> Result<()> {
        self.update_parameters([
            ("UCI_LimitStrength", ParamValue::Bool(false)),
            ("Skill Level", ParamValue::Int(level)),
        ])
    }

    /// Limits the engine's strength to approximate an Elo rating.
    pub fn set_elo_rating(&mut self, elo: i64) -> Result<()> {
        self.update_parameters([
            ("UCI_LimitStrength", ParamValue::Bool(true)),
            ("UCI_Elo", ParamValue::Int(elo)),
        ])
    }

    /// Puts the engine back to full playing strength.
    pub fn resume_full_strength(&mut self) -> Result<()> {
        self.update_parameters([
            ("UCI_LimitStrength", ParamValue::Bool(false)),
            ("Skill Level", ParamValue::Int(20)),
        ])
    }

    pub fn parameters(&self) -> &BTreeMap<String, ParamValue> {
        &self.parameters
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u32) -> Result<()> {
        if depth == 0 {
            return Err(EngineError::InvalidArgument(
                "depth must be a positive integer".to_string(),
            ));
        }
        self.depth = depth;
        Ok(())
    }

    pub fn num_nodes(&self) -> u64 {
        self.num_nodes
    }

    pub fn set_num_nodes(&mut self, num_nodes: u64) -> Result<()> {
        if num_nodes == 0 {
            return Err(EngineError::InvalidArgument(
                "node budget must be a positive integer".to_string(),
            ));
        }
        self.num_nodes = num_nodes;
        Ok(())
    }

    pub fn turn_perspective(&self) -> bool {
        self.turn_perspective
    }

    pub fn set_turn_perspective(&mut self, turn_perspective: bool) {
        self.turn_perspective = turn_perspective;
    }

    /// The diagnostic line recorded by the last best-move search.
    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn version(&self) -> &EngineVersion {
        &self.version
    }

    /// Whether this engine build can report win/draw/loss statistics.
    pub fn has_wdl_option(&self) -> bool {
        self.wdl_supported
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    // ---- position handling ----

    /// Positions the engine at `fen`. `new_game` additionally resets
    /// engine search state (transposition table), which is the right thing
    /// when the position is unrelated to the current one.
    pub fn set_fen_position(&mut self, fen: &str, new_game: bool) -> Result<()> {
        self.prepare_new_position(new_game)?;
        self.put(&format!("position fen {}", fen))
    }

    /// Starts a new game from the initial position and replays `moves`.
    pub fn set_startpos(&mut self, moves: &[&str]) -> Result<()> {
        self.set_fen_position(STARTPOS_FEN, true)?;
        self.make_moves(moves)
    }

    /// Replays `moves` from the current position, all or nothing: the
    /// first illegal move rolls the position back to where it was before
    /// the call and surfaces [`EngineError::IllegalMove`].
    pub fn make_moves(&mut self, moves: &[&str]) -> Result<()> {
        if moves.is_empty() {
            return Ok(());
        }
        let original = self.get_fen_position()?;
        self.prepare_new_position(false)?;
        for &mv in moves {
            if !self.probe_move_legal(mv)? {
                self.set_fen_position(&original, false)?;
                return Err(EngineError::IllegalMove(mv.to_string()));
            }
            let fen = self.get_fen_position()?;
            self.put(&format!("position fen {} moves {}", fen, mv))?;
        }
        Ok(())
    }

    fn read_board_dump(&mut self) -> Result<BoardDump> {
        self.put("d")?;
        let mut grid = Vec::new();
        let mut legend = None;
        let mut fen = None;
        loop {
            let line = self.read_line()?;
            // "Checkers" sits on the final line of a `d` dump.
            if line.contains("Checkers") {
                break;
            }
            if parse::is_grid_line(&line) {
                grid.push(line);
            } else if line.contains("a   b   c") {
                legend = Some(line);
            } else if let Some(f) = parse::fen_line(&line) {
                fen = Some(f);
            }
        }
        if grid.len() != 17 {
            return Err(EngineError::Protocol(format!(
                "board dump had {} grid lines, expected 17",
                grid.len()
            )));
        }
        let fen = fen.ok_or_else(|| {
            EngineError::Protocol("board dump carried no Fen line".to_string())
        })?;
        Ok(BoardDump { grid, legend, fen })
    }

    /// The FEN of the position the engine currently holds.
    pub fn get_fen_position(&mut self) -> Result<String> {
        Ok(self.read_board_dump()?.fen)
    }

    /// The engine's ASCII board, from white's or black's perspective.
    pub fn get_board_visual(&mut self, white_perspective: bool) -> Result<String> {
        let dump = self.read_board_dump()?;
        Ok(parse::board_visual(
            &dump.grid,
            dump.legend.as_deref(),
            white_perspective,
        ))
    }

    /// Contents of a square like "e4", or `None` when it is empty.
    pub fn get_what_is_on_square(&mut self, square: &str) -> Result<Option<Piece>> {
        let dump = self.read_board_dump()?;
        parse::piece_on(&dump.grid, square)
    }

    /// Flips the side to move.
    pub fn flip(&mut self) -> Result<()> {
        self.put("flip")
    }

    // ---- searches ----

    fn go(&mut self) -> Result<()> {
        let depth = self.depth;
        self.put(&format!("go depth {}", depth))
    }

    fn go_nodes(&mut self) -> Result<()> {
        let nodes = self.num_nodes;
        self.put(&format!("go nodes {}", nodes))
    }

    fn go_time(&mut self, ms: u64) -> Result<()> {
        self.put(&format!("go movetime {}", ms))
    }

    fn go_remaining(&mut self, wtime: Option<u64>, btime: Option<u64>) -> Result<()> {
        let mut cmd = String::from("go");
        if let Some(w) = wtime {
            cmd.push_str(&format!(" wtime {}", w));
        }
        if let Some(b) = btime {
            cmd.push_str(&format!(" btime {}", b));
        }
        self.put(&cmd)
    }

    /// Best move at the configured depth, or clock-driven when either
    /// remaining time is given. `None` means the position is terminal.
    pub fn get_best_move(
        &mut self,
        wtime: Option<u64>,
        btime: Option<u64>,
    ) -> Result<Option<String>> {
        if wtime.is_some() || btime.is_some() {
            self.go_remaining(wtime, btime)?;
        } else {
            self.go()?;
        }
        self.finish_best_move()
    }

    /// Best move after searching for a fixed number of milliseconds.
    pub fn get_best_move_time(&mut self, ms: u64) -> Result<Option<String>> {
        self.go_time(ms)?;
        self.finish_best_move()
    }

    /// Whether `mv` is legal in the current position, as judged by the
    /// engine (a depth-1 search restricted to the candidate move). The
    /// session's diagnostic text is restored afterwards.
    pub fn is_move_legal(&mut self, mv: &str) -> Result<bool> {
        self.advise_if_weakened("is_move_legal");
        self.probe_move_legal(mv)
    }

    fn probe_move_legal(&mut self, mv: &str) -> Result<bool> {
        let saved = std::mem::take(&mut self.info);
        self.put(&format!("go depth 1 searchmoves {}", mv))?;
        let result = self.finish_best_move();
        self.info = saved;
        Ok(result?.is_some())
    }

    /// Evaluation of the current position, searching to the configured
    /// depth, or for `searchtime` milliseconds when given.
    pub fn get_evaluation(&mut self, searchtime: Option<u64>) -> Result<Evaluation> {
        self.advise_if_weakened("get_evaluation");
        let sign = self.perspective_sign()?;
        match searchtime {
            None => self.go()?,
            Some(ms) => self.go_time(ms)?,
        }
        let lines = self.drain_search()?;
        parse::evaluation(&lines, sign)
    }

    /// The engine's static evaluation of the current position, with no
    /// search involved. `None` when a side is in check.
    pub fn get_static_eval(&mut self) -> Result<Option<f64>> {
        // The engine prints this one white-relative, the opposite default
        // of search scores, so the flip condition inverts too.
        let sign = if !self.turn_perspective || fen::white_to_move(&self.get_fen_position()?) {
            1.0
        } else {
            -1.0
        };
        self.put("eval")?;
        loop {
            let line = self.read_line()?;
            if parse::is_static_eval_line(&line) {
                let value = parse::static_eval(&line)?;
                if value.is_some() {
                    // `eval` trails an extra blank line after a real value.
                    self.read_line()?;
                }
                return Ok(value.map(|v| v * sign));
            }
        }
    }

    /// Win/draw/loss statistics for the current position, or `None` on a
    /// terminal position. Errors when the engine build has no
    /// `UCI_ShowWDL` option.
    pub fn get_wdl_stats(&mut self) -> Result<Option<Wdl>> {
        if !self.wdl_supported {
            return Err(EngineError::WdlUnsupported);
        }
        self.advise_if_weakened("get_wdl_stats");
        self.go()?;
        let lines = self.drain_search()?;
        parse::wdl(&lines, 1)
    }

    /// The best `count` moves in the current position via MultiPV. The
    /// configured MultiPV and node budget are temporarily overridden and
    /// restored on every path out, including early exhaustion and parse
    /// failures.
    pub fn get_top_moves(
        &mut self,
        count: usize,
        verbose: bool,
        num_nodes: Option<u64>,
    ) -> Result<Vec<TopMove>> {
        if count == 0 {
            return Err(EngineError::InvalidArgument(
                "top-move count must be positive".to_string(),
            ));
        }
        self.advise_if_weakened("get_top_moves");

        let old_multipv = self.multipv();
        let old_num_nodes = self.num_nodes;

        let result = self.top_moves_search(count, verbose, num_nodes);

        self.num_nodes = old_num_nodes;
        let restore = if self.multipv() != old_multipv {
            self.set_option("MultiPV", ParamValue::Int(old_multipv))
        } else {
            Ok(())
        };
        let moves = result?;
        restore?;
        Ok(moves)
    }

    fn top_moves_search(
        &mut self,
        count: usize,
        verbose: bool,
        num_nodes: Option<u64>,
    ) -> Result<Vec<TopMove>> {
        if self.multipv() != count as i64 {
            self.set_option("MultiPV", ParamValue::Int(count as i64))?;
        }
        let sign = self.perspective_sign()?;
        let target = match num_nodes {
            None => {
                self.go()?;
                SearchTarget::Depth(self.depth)
            }
            Some(nodes) => {
                self.num_nodes = nodes;
                self.go_nodes()?;
                SearchTarget::Nodes(nodes)
            }
        };
        let lines = self.drain_search()?;
        parse::top_moves(&lines, target, sign, verbose, self.wdl_supported)
    }

    /// Leaf counts for every move sequence of length `depth` from the
    /// current position, with the per-move breakdown.
    pub fn get_perft(&mut self, depth: u32) -> Result<Perft> {
        if depth == 0 {
            return Err(EngineError::InvalidArgument(
                "perft depth must be a positive integer".to_string(),
            ));
        }
        self.put(&format!("go perft {}", depth))?;
        let mut lines = Vec::new();
        loop {
            let line = self.read_line()?;
            let done = line.contains("searched");
            if !line.is_empty() {
                lines.push(line);
            }
            if done {
                break;
            }
        }
        // Consume the blank line perft trails with.
        self.read_line()?;
        parse::perft(&lines)
    }

    /// Classifies what `mv` would do: direct capture, en passant, or no
    /// capture. A king landing on a friendly rook is Chess960 castling and
    /// counts as no capture.
    pub fn will_move_be_a_capture(&mut self, mv: &str) -> Result<Capture> {
        if mv.len() < 4 || !mv.is_ascii() {
            return Err(EngineError::InvalidArgument(format!(
                "'{}' is not a move in long algebraic notation",
                mv
            )));
        }
        if !self.probe_move_legal(mv)? {
            return Err(EngineError::IllegalMove(mv.to_string()));
        }
        let from_piece = self.get_what_is_on_square(&mv[0..2])?;
        let to_piece = self.get_what_is_on_square(&mv[2..4])?;

        if let Some(target) = to_piece {
            let chess960 = self
                .parameters
                .get("UCI_Chess960")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            if chess960 {
                if let Some(mover) = from_piece {
                    if mover.is_king() && target.is_rook() && mover.is_white() == target.is_white()
                    {
                        return Ok(Capture::None);
                    }
                }
            }
            return Ok(Capture::Direct);
        }

        let fen = self.get_fen_position()?;
        let is_pawn = from_piece.map_or(false, |p| p.is_pawn());
        if is_pawn && fen::en_passant_square(&fen) == Some(&mv[2..4]) {
            Ok(Capture::EnPassant)
        } else {
            Ok(Capture::None)
        }
    }

    /// Runs the engine's non-UCI `bench` command and returns its summary
    /// line (the one starting with `Nodes/second`). Not a UCI command; do
    /// not call while a search is running.
    pub fn benchmark(&mut self, params: BenchmarkParams) -> Result<String> {
        let p = params.normalized();
        self.put(&format!(
            "bench {} {} {} {} {} {}",
            p.tt_size, p.threads, p.limit, p.fen_file, p.limit_type, p.eval_type
        ))?;
        loop {
            let line = self.read_line()?;
            if line.starts_with("Nodes/second") {
                return Ok(line);
            }
        }
    }

    /// Tells the engine to exit and waits for it. Idempotent; dropping the
    /// session does the same.
    pub fn quit(&mut self) {
        self.channel.shutdown();
    }

    // ---- helpers ----

    fn multipv(&self) -> i64 {
        self.parameters
            .get("MultiPV")
            .and_then(|v| v.as_int())
            .unwrap_or(1)
    }

    /// Perspective multiplier for search scores, which the engine reports
    /// relative to the side to move.
    fn perspective_sign(&mut self) -> Result<i64> {
        if self.turn_perspective {
            return Ok(1);
        }
        let fen = self.get_fen_position()?;
        Ok(if fen::white_to_move(&fen) { 1 } else { -1 })
    }

    fn on_weaker_setting(&self) -> bool {
        let limited = self
            .parameters
            .get("UCI_LimitStrength")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let skill = self
            .parameters
            .get("Skill Level")
            .and_then(|v| v.as_int())
            .unwrap_or(20);
        limited || skill < 20
    }

    fn advise_if_weakened(&self, operation: &str) {
        if self.on_weaker_setting() {
            warn!(
                "{} reports full-strength output even though the engine is configured to play weaker",
                operation
            );
        }
    }
}

impl<C: Channel> Drop for Session<C> {
    fn drop(&mut self) {
        self.channel.shutdown();
    }
}
