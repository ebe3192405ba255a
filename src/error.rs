//! Error taxonomy for the engine's two parsing boundaries: FEN and UCI move
//! strings. Neither error type carries partial state — a failed parse never
//! mutates the `Board` being parsed into or matched against.

use thiserror::Error;

/// A FEN string failed to parse. No `Board` is mutated when this is returned.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("FEN is missing the {0} field")]
    MissingField(&'static str),
    #[error("board part of FEN has {0} ranks, expected 8")]
    WrongRankCount(usize),
    #[error("rank {0} of FEN board part sums to {1} files, expected 8")]
    WrongFileCount(usize, u32),
    #[error("unrecognized piece character {0:?} in FEN board part")]
    UnknownPiece(char),
    #[error("invalid side-to-move field {0:?}, expected \"w\" or \"b\"")]
    InvalidSideToMove(String),
    #[error("invalid castling rights character {0:?}")]
    InvalidCastlingChar(char),
    #[error("invalid en passant target square {0:?}")]
    InvalidEnPassantSquare(String),
}

/// A UCI move string failed to resolve against a position.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum MoveError {
    #[error("{0:?} is not a syntactically valid UCI move string")]
    Malformed(String),
    #[error("{0:?} does not name a legal move of the current position")]
    NotLegal(String),
}
