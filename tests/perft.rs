//! Integration perft tests against well-known reference positions.
//!
//! Node counts are the standard published perft values for these positions
//! (see https://www.chessprogramming.org/Perft_Results). A mismatch here
//! means pseudo-legal generation, the legality filter, or make/unmake is
//! wrong somewhere — perft is exhaustive enough to catch nearly any such bug.

use chess_core::board::Board;
use chess_core::perft::perft;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

/// Lets `RUST_LOG=trace cargo test -- --nocapture` surface the attack/magic
/// table construction traces; harmless to call more than once per process.
fn init_logging() {
    let _ = env_logger::try_init();
}

#[test]
fn startpos_perft_depth_1() {
    init_logging();
    assert_eq!(perft(&mut Board::startpos(), 1), 20);
}

#[test]
fn startpos_perft_depth_2() {
    assert_eq!(perft(&mut Board::startpos(), 2), 400);
}

#[test]
fn startpos_perft_depth_3() {
    assert_eq!(perft(&mut Board::startpos(), 3), 8_902);
}

#[test]
fn startpos_perft_depth_4() {
    assert_eq!(perft(&mut Board::startpos(), 4), 197_281);
}

#[test]
fn startpos_perft_depth_5() {
    assert_eq!(perft(&mut Board::startpos(), 5), 4_865_609);
}

#[test]
fn kiwipete_perft_depth_3() {
    let mut board = Board::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft(&mut board, 3), 97_862);
}

#[test]
fn kiwipete_perft_depth_4() {
    let mut board = Board::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft(&mut board, 4), 4_085_603);
}

#[test]
fn position_3_perft_depth_5() {
    let mut board = Board::from_fen(POSITION_3).unwrap();
    assert_eq!(perft(&mut board, 5), 674_624);
}

#[test]
fn position_4_perft_depth_4() {
    let mut board = Board::from_fen(POSITION_4).unwrap();
    assert_eq!(perft(&mut board, 4), 422_333);
}

/// En passant capture that would expose the king to a rook along the
/// vacated rank must not be generated as legal.
#[test]
fn en_passant_pinned_capture_is_excluded() {
    let mut board = Board::from_fen("8/8/8/8/k2Pp2Q/8/8/K7 b - d3 0 1").unwrap();
    assert_eq!(perft(&mut board, 1), 6);
}

/// Castling through a square attacked by the enemy is illegal even though
/// the king's origin and destination squares are both safe.
#[test]
fn castling_through_check_is_forbidden() {
    // Black rook on f7 covers the f1 square the white king would pass through.
    let mut board = Board::from_fen("4k3/5r2/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let mut list = chess_core::movegen::MoveList::new();
    chess_core::movegen::gen_all_moves(&board, &mut list);
    let has_castle = list.iter().any(|m| m.is_castling());
    assert!(has_castle, "pseudo-legal generation should still offer castling");

    let legal = chess_core::movegen::gen_all_legal_moves(&mut board);
    let legal_castle = legal.iter().any(|m| m.is_castling());
    assert!(!legal_castle, "castling through an attacked square must be filtered out");
}

/// Castling out of check is illegal.
#[test]
fn castling_out_of_check_is_forbidden() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/4r3/4K2R w K - 0 1").unwrap();
    let legal = chess_core::movegen::gen_all_legal_moves(&mut board);
    assert!(!legal.iter().any(|m| m.is_castling()));
}

/// A promotion that is also a capture must be classified as noisy.
#[test]
fn promotion_with_capture_is_noisy() {
    let mut board = Board::from_fen("1n6/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
    let mut noisy = chess_core::movegen::MoveList::new();
    chess_core::movegen::gen_all_noisy_moves(&board, &mut noisy);
    assert!(
        noisy.iter().any(|m| m.is_promotion() && m.is_capture() && m.to() == chess_core::types::Square::B8)
    );
}

/// A pinned piece must not be able to move off the pin line.
#[test]
fn pinned_piece_cannot_move_off_line() {
    // White king on e1, white rook on e4 pinned by black rook on e8 along the e-file.
    let mut board = Board::from_fen("4r3/8/8/8/4R3/8/8/4K3 w - - 0 1").unwrap();
    let legal = chess_core::movegen::gen_all_legal_moves(&mut board);
    let rook_moves_off_file =
        legal.iter().any(|m| m.from() == chess_core::types::Square::from_rank_file(3, 4) && m.to().file() != 4);
    assert!(!rook_moves_off_file, "pinned rook must stay on the e-file");
}
