//! Zobrist hashing keys.
//!
//! A position's `hash` is the XOR of a key per piece-on-square, one key for
//! the side to move, one per castling-rights combination, and one per
//! en-passant file. XORing a key in and back out is a no-op, which is what
//! lets `make_move`/`unmake_move` maintain `hash` incrementally instead of
//! recomputing it from scratch on every call.

use std::sync::LazyLock;

use rand::{RngCore, SeedableRng};
use rand::rngs::StdRng;

use crate::types::{Color, Piece, Square};

/// Fixed seed: these keys only need to be internally consistent for a single
/// process run, not stable across builds or unpredictable to an adversary.
const SEED: u64 = 0x9E37_79B9_7F4A_7C15;

pub static KEYS: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

pub struct ZobristKeys {
    piece_square: [[u64; 64]; 12],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        log::trace!("generating zobrist key table");
        let mut rng = StdRng::seed_from_u64(SEED);

        let mut piece_square = [[0u64; 64]; 12];
        for table in piece_square.iter_mut() {
            for key in table.iter_mut() {
                *key = rng.next_u64();
            }
        }

        let mut castling = [0u64; 16];
        for key in castling.iter_mut() {
            *key = rng.next_u64();
        }

        let mut en_passant_file = [0u64; 8];
        for key in en_passant_file.iter_mut() {
            *key = rng.next_u64();
        }

        Self { piece_square, side_to_move: rng.next_u64(), castling, en_passant_file }
    }

    #[inline(always)]
    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_square[piece.index()][sq.index()]
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> u64 {
        self.side_to_move
    }

    #[inline(always)]
    pub fn castling(&self, rights: u8) -> u64 {
        self.castling[rights as usize]
    }

    #[inline(always)]
    pub fn en_passant_file(&self, file: u8) -> u64 {
        self.en_passant_file[file as usize]
    }
}

/// Computes a position's hash from scratch. Used by `Board::from_fen`; every
/// other `Board` mutation updates `hash` incrementally instead of calling this.
pub fn compute_hash(mailbox: &[Option<Piece>; 64], side_to_move: Color, castling_rights: u8, ep_square: Option<Square>) -> u64 {
    let keys = &*KEYS;
    let mut hash = 0u64;

    for sq in Square::ALL {
        if let Some(piece) = mailbox[sq] {
            hash ^= keys.piece(piece, sq);
        }
    }

    if side_to_move == Color::Black {
        hash ^= keys.side_to_move();
    }

    hash ^= keys.castling(castling_rights);

    if let Some(ep) = ep_square {
        hash ^= keys.en_passant_file(ep.file());
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceType;

    #[test]
    fn same_position_hashes_equal() {
        let mut mailbox = [None; 64];
        mailbox[Square::E1.index()] = Some(Piece::new(Color::White, PieceType::King));
        mailbox[Square::E8.index()] = Some(Piece::new(Color::Black, PieceType::King));

        let a = compute_hash(&mailbox, Color::White, 0b1111, None);
        let b = compute_hash(&mailbox, Color::White, 0b1111, None);
        assert_eq!(a, b);
    }

    #[test]
    fn side_to_move_changes_hash() {
        let mailbox = [None; 64];
        let white = compute_hash(&mailbox, Color::White, 0, None);
        let black = compute_hash(&mailbox, Color::Black, 0, None);
        assert_ne!(white, black);
    }

    #[test]
    fn en_passant_file_changes_hash() {
        let mailbox = [None; 64];
        let none = compute_hash(&mailbox, Color::White, 0, None);
        let e_file = compute_hash(&mailbox, Color::White, 0, Some(Square::from_rank_file(3, 4)));
        assert_ne!(none, e_file);
    }
}
