//! Pure parsers over the engine's drained output lines. Everything here is
//! a function of the text alone; no session state, no I/O. Token positions
//! in `info` lines drift between engine builds, so each extraction scans
//! for its keyword instead of assuming fixed offsets.

use crate::error::{EngineError, Result};
use crate::types::{EvalKind, Evaluation, Perft, Piece, SearchTarget, TopMove, TopMoveExtras, Wdl};

fn protocol_err(msg: impl Into<String>) -> EngineError {
    EngineError::Protocol(msg.into())
}

/// Token following `key` (plus `offset - 1` more), if present.
fn pick<'a>(tokens: &[&'a str], key: &str, offset: usize) -> Option<&'a str> {
    tokens
        .iter()
        .position(|t| *t == key)
        .and_then(|i| tokens.get(i + offset))
        .copied()
}

fn pick_u64(tokens: &[&str], key: &str) -> Option<u64> {
    pick(tokens, key, 1).and_then(|t| t.parse().ok())
}

fn pick_i64(tokens: &[&str], key: &str) -> Option<i64> {
    pick(tokens, key, 1).and_then(|t| t.parse().ok())
}

/// Extracts the move from the terminal `bestmove` line of a search drain.
/// The engine's `(none)` sentinel (no legal move) maps to `None`.
pub fn best_move(lines: &[String]) -> Result<Option<String>> {
    let last = lines.last().ok_or_else(|| protocol_err("empty search output"))?;
    let tokens: Vec<&str> = last.split_whitespace().collect();
    match tokens.as_slice() {
        ["bestmove", "(none)", ..] => Ok(None),
        ["bestmove", mv, ..] => Ok(Some((*mv).to_string())),
        _ => Err(protocol_err(format!("expected a bestmove line, got '{}'", last))),
    }
}

/// The diagnostic line recorded after a search: the line preceding
/// `bestmove`, or empty when the engine produced nothing else.
pub fn diagnostic_line(lines: &[String]) -> String {
    if lines.len() >= 2 {
        lines[lines.len() - 2].clone()
    } else {
        String::new()
    }
}

/// Score from the last `info` line carrying a `score` token. `sign` is the
/// perspective multiplier: -1 flips the side-to-move-relative value that the
/// engine reports into a white-relative one.
pub fn evaluation(lines: &[String], sign: i64) -> Result<Evaluation> {
    let line = lines
        .iter()
        .rev()
        .find(|l| l.starts_with("info") && l.contains("score"))
        .ok_or_else(|| protocol_err("no info line with a score token"))?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let kind = match pick(&tokens, "score", 1) {
        Some("cp") => EvalKind::Cp,
        Some("mate") => EvalKind::Mate,
        other => {
            return Err(protocol_err(format!(
                "unrecognized score kind {:?} in '{}'",
                other, line
            )))
        }
    };
    let value: i64 = pick(&tokens, "score", 2)
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| protocol_err(format!("unparsable score value in '{}'", line)))?;
    Ok(Evaluation { kind, value: value * sign })
}

/// Multi-PV move list from a search drain. Scans the lines in reverse and
/// stops as soon as a line no longer belongs to the final iteration: in a
/// depth-limited search that is any line at a different depth, in a
/// node-limited search any line below the node budget. This is what drops
/// the stale shallower lines that iterative deepening interleaves.
pub fn top_moves(
    lines: &[String],
    target: SearchTarget,
    sign: i64,
    verbose: bool,
    wdl_supported: bool,
) -> Result<Vec<TopMove>> {
    let mut moves: Vec<TopMove> = Vec::new();
    for line in lines.iter().rev() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&"bestmove") {
            if tokens.get(1) == Some(&"(none)") {
                return Ok(Vec::new());
            }
            continue;
        }
        if !tokens.contains(&"multipv") || !tokens.contains(&"depth") {
            break;
        }
        match target {
            SearchTarget::Depth(depth) => {
                if pick_u64(&tokens, "depth") != Some(depth as u64) {
                    break;
                }
            }
            SearchTarget::Nodes(nodes) => {
                if pick_u64(&tokens, "nodes").map_or(true, |n| n < nodes) {
                    break;
                }
            }
        }

        let mv = pick(&tokens, "pv", 1)
            .ok_or_else(|| protocol_err(format!("info line without a pv move: '{}'", line)))?;
        let extras = if verbose {
            let wdl = if wdl_supported {
                Some(wdl_triple(&tokens, sign).ok_or_else(|| {
                    protocol_err(format!("info line without a wdl triple: '{}'", line))
                })?)
            } else {
                None
            };
            Some(TopMoveExtras {
                seldepth: pick_u64(&tokens, "seldepth"),
                time: pick_u64(&tokens, "time"),
                nodes: pick_u64(&tokens, "nodes"),
                nps: pick_u64(&tokens, "nps"),
                multipv_line: pick_u64(&tokens, "multipv"),
                wdl,
            })
        } else {
            None
        };
        moves.insert(
            0,
            TopMove {
                mv: mv.to_string(),
                centipawn: pick_i64(&tokens, "cp").map(|v| v * sign),
                mate: pick_i64(&tokens, "mate").map(|v| v * sign),
                extras,
            },
        );
    }
    Ok(moves)
}

/// `wdl <w> <d> <l>` triple from a tokenized info line. A negative sign
/// swaps win and loss, since the engine reports from the side to move.
fn wdl_triple(tokens: &[&str], sign: i64) -> Option<Wdl> {
    let idx = tokens.iter().position(|t| *t == "wdl")?;
    let w: u32 = tokens.get(idx + 1)?.parse().ok()?;
    let d: u32 = tokens.get(idx + 2)?.parse().ok()?;
    let l: u32 = tokens.get(idx + 3)?.parse().ok()?;
    if sign < 0 {
        Some(Wdl { win: l, draw: d, loss: w })
    } else {
        Some(Wdl { win: w, draw: d, loss: l })
    }
}

/// Win/draw/loss stats from a full search drain, taken from the last
/// `multipv 1` line. `None` when the position is terminal (no best move).
pub fn wdl(lines: &[String], sign: i64) -> Result<Option<Wdl>> {
    if lines.last().map_or(false, |l| l.starts_with("bestmove (none)")) {
        return Ok(None);
    }
    let line = lines
        .iter()
        .rev()
        .find(|l| l.contains(" multipv 1 "))
        .ok_or_else(|| protocol_err("no multipv 1 line in search output"))?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let triple = wdl_triple(&tokens, sign)
        .ok_or_else(|| protocol_err(format!("no wdl triple in '{}'", line)))?;
    Ok(Some(triple))
}

/// Perft breakdown from the `<move>: <count>` lines plus the summary line.
/// The per-move counts must sum to the reported total; a mismatch means the
/// output was mis-read and is reported as a protocol error rather than
/// silently truncated.
pub fn perft(lines: &[String]) -> Result<Perft> {
    let mut perft = Perft {
        total: 0,
        moves: Default::default(),
    };
    let mut saw_total = false;
    for line in lines {
        if line.is_empty() {
            continue;
        }
        if line.contains("searched") {
            let count = line
                .split(':')
                .nth(1)
                .and_then(|s| s.trim().parse().ok())
                .ok_or_else(|| protocol_err(format!("unparsable perft total '{}'", line)))?;
            perft.total = count;
            saw_total = true;
            break;
        }
        let (mv, count) = line
            .split_once(':')
            .ok_or_else(|| protocol_err(format!("unexpected perft line '{}'", line)))?;
        let count: u64 = count
            .trim()
            .parse()
            .map_err(|_| protocol_err(format!("unparsable perft count '{}'", line)))?;
        if perft.moves.insert(mv.trim().to_string(), count).is_some() {
            return Err(protocol_err(format!("duplicate perft move '{}'", mv)));
        }
    }
    if !saw_total {
        return Err(protocol_err("perft output ended without a total"));
    }
    let sum: u64 = perft.moves.values().sum();
    if sum != perft.total {
        return Err(protocol_err(format!(
            "perft counts sum to {} but engine reported {}",
            sum, perft.total
        )));
    }
    Ok(perft)
}

/// True for the 17 lines making up the board grid of a `d` dump.
pub fn is_grid_line(line: &str) -> bool {
    line.contains('+') || line.contains('|')
}

/// Mirrors one grid line for the black perspective. Piece rows are split on
/// their cell separators and the cells reversed, keeping the rank number in
/// its right-hand gutter; the `+---+` borders are symmetric already.
fn mirror_grid_line(line: &str) -> String {
    if !line.contains('|') {
        return line.to_string();
    }
    let mut cells: Vec<&str> = line.split('|').collect();
    // First chunk precedes the leading '|', last is the rank gutter.
    let len = cells.len();
    if len > 3 {
        cells[1..len - 1].reverse();
    }
    cells.join("|")
}

/// Mirrors the optional file legend (`a   b   ...   h`).
fn mirror_legend(line: &str) -> String {
    let mut files: Vec<&str> = line.split_whitespace().collect();
    files.reverse();
    files.join("   ")
}

/// Assembles the displayable board from the grid lines of a `d` dump, from
/// either side's perspective. For black, cells are reversed within each
/// rank and then the rank order is reversed; the legend, when the engine
/// emitted one, is mirrored to match.
pub fn board_visual(grid: &[String], legend: Option<&str>, white_perspective: bool) -> String {
    let mut lines: Vec<String> = if white_perspective {
        grid.to_vec()
    } else {
        let mut mirrored: Vec<String> = grid.iter().map(|l| mirror_grid_line(l)).collect();
        mirrored.reverse();
        mirrored
    };
    if let Some(legend) = legend {
        let legend = if white_perspective {
            legend.trim_end().to_string()
        } else {
            mirror_legend(legend)
        };
        lines.push(format!("  {}", legend.trim_start()));
    }
    lines.join("\n") + "\n"
}

/// Contents of `square` (e.g. "e4") in a white-perspective grid dump.
pub fn piece_on(grid: &[String], square: &str) -> Result<Option<Piece>> {
    let bytes = square.as_bytes();
    if bytes.len() != 2
        || !bytes[0].is_ascii_alphabetic()
        || !(b'a'..=b'h').contains(&bytes[0].to_ascii_lowercase())
        || !(b'1'..=b'8').contains(&bytes[1])
    {
        return Err(EngineError::InvalidArgument(format!(
            "'{}' is not a board square",
            square
        )));
    }
    let file = (bytes[0].to_ascii_lowercase() - b'a') as usize;
    let rank = (bytes[1] - b'1') as usize;
    // Grid rows run rank 8 down to rank 1, with borders interleaved.
    let row = grid
        .get((7 - rank) * 2 + 1)
        .ok_or_else(|| protocol_err("board dump has too few grid lines"))?;
    let cells: Vec<&str> = row.split('|').collect();
    let cell = cells
        .get(file + 1)
        .ok_or_else(|| protocol_err(format!("board row has too few cells: '{}'", row)))?
        .trim();
    match cell.chars().next() {
        None => Ok(None),
        Some(c) => Piece::from_char(c)
            .map(Some)
            .ok_or_else(|| protocol_err(format!("unrecognized piece character '{}'", c))),
    }
}

/// The FEN reported on the `Fen:` line of a `d` dump, if this is that line.
pub fn fen_line(line: &str) -> Option<String> {
    line.strip_prefix("Fen:").map(|rest| rest.trim().to_string())
}

/// True for the summary line of an `eval` dump.
pub fn is_static_eval_line(line: &str) -> bool {
    line.starts_with("Final evaluation") || line.starts_with("Total Evaluation")
}

/// Static evaluation from the `eval` summary line; `None` when the engine
/// declines to evaluate (side in check). The value is white-relative as
/// printed; perspective is applied by the caller.
pub fn static_eval(line: &str) -> Result<Option<f64>> {
    let token = line
        .split_whitespace()
        .nth(2)
        .ok_or_else(|| protocol_err(format!("truncated eval line '{}'", line)))?;
    if token == "none" {
        return Ok(None);
    }
    token
        .parse()
        .map(Some)
        .map_err(|_| protocol_err(format!("unparsable static eval '{}'", line)))
}
