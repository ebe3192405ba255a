//! Perft driver binary: runs the library's correctness/benchmark harness
//! from the command line. Move generation itself lives in the library.

use chess_core::perft::benchmark_perft;

fn main() {
    benchmark_perft(6);
}
