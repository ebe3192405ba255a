//! Perft testing module.
//!
//! Implements the **perft (performance test)** routine, which validates move
//! generation correctness by counting the leaf nodes reachable from a given
//! position at a fixed depth. Pseudo-legal moves are generated, made, checked
//! for king safety, and unmade; illegal moves are excluded from the count
//! without ever materializing a separate legal-move generator.

use std::time::Instant;

use crate::board::Board;
use crate::movegen::{MoveList, gen_all_moves};

const RUNS: usize = 5;

pub fn perft(board: &mut Board, depth: u64) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut list = MoveList::new();
    gen_all_moves(board, &mut list);

    let mover = board.side_to_move();
    let mut nodes = 0;

    for &m in list.iter() {
        let undo = board.make_move(m);

        if !board.king_in_check(mover) {
            nodes += perft(board, depth - 1);
        }

        board.unmake_move(m, undo);
    }

    nodes
}

pub fn perft_n(depth: u64) -> u64 {
    let mut board = Board::startpos();
    board.print();

    let mut nodes: u64 = 0;
    for d in 1..=depth {
        nodes = perft(&mut board, d);
        println!("perft({d}): {nodes}");
    }

    nodes
}

pub fn kiwipete(depth: u64) {
    let mut board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    board.print();

    for d in 1..=depth {
        let nodes = perft(&mut board, d);
        println!("perft({d}): {nodes}");
    }
}

/// Runs perft `RUNS` times on the starting position, trims the fastest and
/// slowest run, and reports average nodes-per-second.
pub fn benchmark_perft(depth: u64) {
    let mut nodes_vec: Vec<u64> = Vec::new();
    let mut time_vec: Vec<f64> = Vec::new();

    // Warmup run
    let mut warmup = Board::startpos();
    let _ = perft(&mut warmup, depth);

    for _ in 0..RUNS {
        let mut board = Board::startpos();

        let start = Instant::now();
        let nodes = perft(&mut board, depth);
        let elapsed = start.elapsed().as_secs_f64();

        nodes_vec.push(nodes);
        time_vec.push(elapsed);
    }

    time_vec.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let trimmed_times = &time_vec[1..RUNS - 1];

    if trimmed_times.is_empty() {
        panic!("not enough runs for a stable benchmark");
    }

    let avg_time: f64 = trimmed_times.iter().sum::<f64>() / trimmed_times.len() as f64;
    assert!(nodes_vec.iter().all(|&n| n == nodes_vec[0]));
    let nodes = nodes_vec[0];

    let nps = if avg_time > 0.0 { nodes as f64 / avg_time } else { 0.0 };

    println!("Depth: {depth}");
    println!("Nodes: {nodes}");
    println!("Avg Time: {avg_time:.6} s");
    println!("Avg NPS: {nps:.2} nodes/sec");
}
