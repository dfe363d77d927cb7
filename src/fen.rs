//! Purely syntactic FEN validation. This never decides whether a position
//! is *legal*; that verdict belongs to the engine (see
//! `Session::is_fen_valid`).

pub const PIECE_CHARS: &[char] = &['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];

/// Checks the textual shape of a FEN string: six fields, eight ranks each
/// summing to eight squares, only whitelisted piece letters, no adjacent
/// digit runs, exactly one king per side, and sane side/castling/en-passant
/// and move-counter fields.
pub fn is_syntax_valid(fen: &str) -> bool {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return false;
    }

    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 {
        return false;
    }
    let mut white_kings = 0;
    let mut black_kings = 0;
    for rank in &ranks {
        let mut squares = 0u32;
        let mut previous_was_digit = false;
        for c in rank.chars() {
            if let Some(d) = c.to_digit(10) {
                if previous_was_digit || !(1..=8).contains(&d) {
                    return false;
                }
                squares += d;
                previous_was_digit = true;
            } else if PIECE_CHARS.contains(&c) {
                match c {
                    'K' => white_kings += 1,
                    'k' => black_kings += 1,
                    _ => {}
                }
                squares += 1;
                previous_was_digit = false;
            } else {
                return false;
            }
        }
        if squares != 8 {
            return false;
        }
    }
    if white_kings != 1 || black_kings != 1 {
        return false;
    }

    if !matches!(fields[1], "w" | "b") {
        return false;
    }

    let castling = fields[2];
    if castling != "-"
        && (castling.is_empty()
            || castling.len() > 4
            || !castling.chars().all(|c| "KQkq".contains(c)))
    {
        return false;
    }

    let ep = fields[3];
    if ep != "-" {
        let bytes = ep.as_bytes();
        if bytes.len() != 2 || !(b'a'..=b'h').contains(&bytes[0]) || !(b'1'..=b'8').contains(&bytes[1]) {
            return false;
        }
    }

    let (halfmove, fullmove) = match (fields[4].parse::<u32>(), fields[5].parse::<u32>()) {
        (Ok(h), Ok(f)) => (h, f),
        _ => return false,
    };
    if halfmove >= fullmove.saturating_mul(2) {
        return false;
    }

    true
}

/// Side to move from a FEN string, `true` for white. Falls back to white if
/// the field is missing, which matches how the engine treats garbage input.
pub fn white_to_move(fen: &str) -> bool {
    fen.split_whitespace().nth(1) != Some("b")
}

/// The en-passant target field of a FEN string, if any.
pub fn en_passant_square(fen: &str) -> Option<&str> {
    match fen.split_whitespace().nth(3) {
        Some("-") | None => None,
        Some(sq) => Some(sq),
    }
}
