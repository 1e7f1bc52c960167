//! Interpreter throughput profiling: a hand-rolled timing loop
//! (`harness = false`) rather than criterion's macros, since there is
//! nothing else in this workspace to compare against.
//!
//! ```sh
//! cargo bench --bench feed
//! ```

use std::hint::black_box;
use std::time::Instant;

use tsm_screen::Screen;
use tsm_vte::Vte;

const ITERATIONS: usize = 2_000;

fn generate_mixed(size: usize) -> Vec<u8> {
    let patterns: &[&[u8]] = &[
        b"The quick brown fox jumps over the lazy dog. ",
        b"\x1b[1;31mRed\x1b[0m ",
        b"\x1b[32mGreen\x1b[0m ",
        b"\x1b[H\x1b[2J",
        b"\x1b[10;20H",
        "caf\u{e9} \u{2603} \u{1f600} ".as_bytes(),
        b"\r\n\t\x08",
    ];
    let mut out = Vec::with_capacity(size);
    let mut idx = 0;
    while out.len() < size {
        out.extend_from_slice(patterns[idx % patterns.len()]);
        idx += 1;
    }
    out.truncate(size);
    out
}

fn run(data: &[u8]) -> std::time::Duration {
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mut screen = Screen::new(80, 24);
        let mut vte = Vte::new(&mut screen);
        let data = black_box(data);
        vte.input(data, &mut |bytes: &[u8]| {
            black_box(bytes);
        });
    }
    start.elapsed()
}

fn main() {
    for size in [1024, 64 * 1024] {
        let data = generate_mixed(size);
        let elapsed = run(&data);
        let total_bytes = data.len() * ITERATIONS;
        let throughput_mbs = (total_bytes as f64 / 1_000_000.0) / elapsed.as_secs_f64();
        println!(
            "mixed ({size:>6} B)  {:>8} iters  {:>8.2} ms  {:>10.2} MB/s",
            ITERATIONS,
            elapsed.as_secs_f64() * 1000.0,
            throughput_mbs
        );
    }
}
