use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A piece as printed in the engine's board dump and FEN output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Piece {
    WhitePawn,
    BlackPawn,
    WhiteKnight,
    BlackKnight,
    WhiteBishop,
    BlackBishop,
    WhiteRook,
    BlackRook,
    WhiteQueen,
    BlackQueen,
    WhiteKing,
    BlackKing,
}

impl Piece {
    pub fn from_char(c: char) -> Option<Piece> {
        Some(match c {
            'P' => Piece::WhitePawn,
            'p' => Piece::BlackPawn,
            'N' => Piece::WhiteKnight,
            'n' => Piece::BlackKnight,
            'B' => Piece::WhiteBishop,
            'b' => Piece::BlackBishop,
            'R' => Piece::WhiteRook,
            'r' => Piece::BlackRook,
            'Q' => Piece::WhiteQueen,
            'q' => Piece::BlackQueen,
            'K' => Piece::WhiteKing,
            'k' => Piece::BlackKing,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Piece::WhitePawn => 'P',
            Piece::BlackPawn => 'p',
            Piece::WhiteKnight => 'N',
            Piece::BlackKnight => 'n',
            Piece::WhiteBishop => 'B',
            Piece::BlackBishop => 'b',
            Piece::WhiteRook => 'R',
            Piece::BlackRook => 'r',
            Piece::WhiteQueen => 'Q',
            Piece::BlackQueen => 'q',
            Piece::WhiteKing => 'K',
            Piece::BlackKing => 'k',
        }
    }

    pub fn is_white(self) -> bool {
        self.as_char().is_ascii_uppercase()
    }

    pub fn is_pawn(self) -> bool {
        matches!(self, Piece::WhitePawn | Piece::BlackPawn)
    }

    pub fn is_king(self) -> bool {
        matches!(self, Piece::WhiteKing | Piece::BlackKing)
    }

    pub fn is_rook(self) -> bool {
        matches!(self, Piece::WhiteRook | Piece::BlackRook)
    }
}

/// Classification of a candidate move's effect on material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capture {
    Direct,
    EnPassant,
    None,
}

impl fmt::Display for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Capture::Direct => "direct capture",
            Capture::EnPassant => "en passant",
            Capture::None => "no capture",
        };
        write!(f, "{}", s)
    }
}

/// Score kind reported on an engine `info` line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalKind {
    Cp,
    Mate,
}

/// A search evaluation: centipawns, or moves-to-mate. The sign has already
/// been adjusted for the session's configured perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(rename = "type")]
    pub kind: EvalKind,
    pub value: i64,
}

/// Win/draw/loss permille triple for the side the perspective favours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wdl {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

/// Extra per-line search metadata, populated only for verbose top-move
/// queries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopMoveExtras {
    pub seldepth: Option<u64>,
    pub time: Option<u64>,
    pub nodes: Option<u64>,
    pub nps: Option<u64>,
    pub multipv_line: Option<u64>,
    pub wdl: Option<Wdl>,
}

/// One entry of a multi-PV move list. Exactly one of `centipawn` and `mate`
/// is populated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopMove {
    #[serde(rename = "move")]
    pub mv: String,
    pub centipawn: Option<i64>,
    pub mate: Option<i64>,
    #[serde(flatten)]
    pub extras: Option<TopMoveExtras>,
}

/// Result of a `go perft` run: the total leaf count plus the per-move
/// breakdown. Per the protocol the per-move counts must sum to the total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perft {
    pub total: u64,
    pub moves: BTreeMap<String, u64>,
}

/// Which limit a search ran under; used to decide which info lines belong
/// to the just-completed iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchTarget {
    Depth(u32),
    Nodes(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchLimitType {
    Depth,
    Perft,
    Nodes,
    Movetime,
}

impl fmt::Display for BenchLimitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BenchLimitType::Depth => "depth",
            BenchLimitType::Perft => "perft",
            BenchLimitType::Nodes => "nodes",
            BenchLimitType::Movetime => "movetime",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchEvalType {
    Mixed,
    Classical,
    Nnue,
}

impl fmt::Display for BenchEvalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BenchEvalType::Mixed => "mixed",
            BenchEvalType::Classical => "classical",
            BenchEvalType::Nnue => "NNUE",
        };
        write!(f, "{}", s)
    }
}

/// Parameters for the engine's non-UCI `bench` command. Out-of-range fields
/// are silently clamped back to their defaults, matching the engine's own
/// tolerance for bad bench arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkParams {
    pub tt_size: u32,
    pub threads: u32,
    pub limit: u32,
    pub fen_file: String,
    pub limit_type: BenchLimitType,
    pub eval_type: BenchEvalType,
}

impl Default for BenchmarkParams {
    fn default() -> Self {
        Self {
            tt_size: 16,
            threads: 1,
            limit: 13,
            fen_file: "default".to_string(),
            limit_type: BenchLimitType::Depth,
            eval_type: BenchEvalType::Mixed,
        }
    }
}

impl BenchmarkParams {
    pub fn normalized(mut self) -> Self {
        let defaults = BenchmarkParams::default();
        if !(1..=128_000).contains(&self.tt_size) {
            self.tt_size = defaults.tt_size;
        }
        if !(1..=512).contains(&self.threads) {
            self.threads = defaults.threads;
        }
        if !(1..=10_000).contains(&self.limit) {
            self.limit = defaults.limit;
        }
        if !(self.fen_file.ends_with(".fen") && Path::new(&self.fen_file).is_file()) {
            self.fen_file = defaults.fen_file;
        }
        self
    }
}
