//! UCI move-string encoding and decoding.
//!
//! This is just the `from`/`to`/`promotion` string format UCI uses for moves
//! (e.g. `e2e4`, `e7e8q`) — not the UCI protocol loop, which is out of scope
//! for this crate.

use crate::board::Board;
use crate::error::MoveError;
use crate::movegen::gen_all_legal_moves;
use crate::moves::Move;
use crate::types::{PieceType, Square};

/// Formats a move in UCI notation: `<from><to>[promotion]`.
pub fn move_to_uci(m: Move) -> String {
    let mut s = format!("{}{}", m.from().to_algebraic(), m.to().to_algebraic());
    if m.is_promotion() {
        s.push(promotion_char(m.promotion_piece()));
    }
    s
}

/// Parses a UCI move string against `board`, resolving it to the matching
/// legal move. Disambiguates promotion piece and capture/en-passant/castle
/// flags by looking the decoded (from, to, promotion) tuple up among the
/// position's legal moves, since the UCI string itself carries no flags.
pub fn move_from_uci(s: &str, board: &mut Board) -> Result<Move, MoveError> {
    let Some((from, to, promotion)) = parse_uci_str(s) else {
        log::warn!("malformed UCI move string {s:?}");
        return Err(MoveError::Malformed(s.to_string()));
    };

    let legal = gen_all_legal_moves(board);
    for &candidate in legal.iter() {
        if candidate.from() != from || candidate.to() != to {
            continue;
        }
        let candidate_promotion = if candidate.is_promotion() { Some(candidate.promotion_piece()) } else { None };
        if candidate_promotion == promotion {
            return Ok(candidate);
        }
    }

    log::debug!("UCI move string {s:?} does not name a legal move of the current position");
    Err(MoveError::NotLegal(s.to_string()))
}

fn parse_uci_str(s: &str) -> Option<(Square, Square, Option<PieceType>)> {
    let bytes = s.as_bytes();
    if s.len() != 4 && s.len() != 5 {
        return None;
    }

    let from = Square::from_algebraic(&s[0..2])?;
    let to = Square::from_algebraic(&s[2..4])?;

    let promotion = if bytes.len() == 5 {
        Some(match bytes[4] {
            b'n' => PieceType::Knight,
            b'b' => PieceType::Bishop,
            b'r' => PieceType::Rook,
            b'q' => PieceType::Queen,
            _ => return None,
        })
    } else {
        None
    };

    Some((from, to, promotion))
}

fn promotion_char(piece_type: PieceType) -> char {
    match piece_type {
        PieceType::Knight => 'n',
        PieceType::Bishop => 'b',
        PieceType::Rook => 'r',
        PieceType::Queen => 'q',
        _ => unreachable!("only minor/major pieces are promotion targets"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_e2e4_round_trips() {
        let mut board = Board::startpos();
        let mv = move_from_uci("e2e4", &mut board).unwrap();
        assert_eq!(move_to_uci(mv), "e2e4");
    }

    #[test]
    fn malformed_string_is_an_error() {
        let mut board = Board::startpos();
        assert!(matches!(move_from_uci("zz99", &mut board), Err(MoveError::Malformed(_))));
    }

    #[test]
    fn legal_but_nonexistent_move_is_rejected() {
        let mut board = Board::startpos();
        // e2e5 is not a legal pawn move from the starting position
        assert!(matches!(move_from_uci("e2e5", &mut board), Err(MoveError::NotLegal(_))));
    }

    #[test]
    fn promotion_move_round_trips() {
        let mut board = Board::from_fen("8/P6k/8/8/8/8/7K/8 w - - 0 1").unwrap();
        let mv = move_from_uci("a7a8q", &mut board).unwrap();
        assert_eq!(move_to_uci(mv), "a7a8q");
    }
}
