//! Trains a small network on the combined AND/OR/XOR/NAND/NOR truth table
//! and prints its predictions. Run with `RUST_LOG=debug` to watch per-epoch
//! progress.

use std::time::Instant;

use garnet_nn::{Network, NetworkConfig, TrainingData};
use tracing_subscriber::EnvFilter;

#[rustfmt::skip]
const TABLE: [[f64; 4]; 20] = [
    [0.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0], [1.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 0.0], [0.0, 1.0, 1.0, 1.0], [1.0, 0.0, 1.0, 1.0], [1.0, 1.0, 1.0, 1.0],
    [0.0, 0.0, 2.0, 0.0], [0.0, 1.0, 2.0, 1.0], [1.0, 0.0, 2.0, 1.0], [1.0, 1.0, 2.0, 0.0],
    [0.0, 0.0, 3.0, 1.0], [0.0, 1.0, 3.0, 1.0], [1.0, 0.0, 3.0, 1.0], [1.0, 1.0, 3.0, 0.0],
    [0.0, 0.0, 4.0, 1.0], [0.0, 1.0, 4.0, 0.0], [1.0, 0.0, 4.0, 0.0], [1.0, 1.0, 4.0, 0.0],
];

const GATES: [&str; 5] = ["AND", "OR", "XOR", "NAND", "NOR"];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut td = TrainingData::new(50_000, 0.8, 0.05);
    for row in TABLE {
        td.add_row(row[..3].to_vec(), row[3..].to_vec());
    }

    let mut cfg = NetworkConfig::new(vec![3, 4, 1]);
    cfg.debug = true;
    let mut net = Network::new(&cfg).expect("valid configuration");

    let start = Instant::now();
    let mean_error = net.train(&mut td).expect("training failed");
    println!(
        "trained in {:.2?}, mean test error {mean_error:.5}",
        start.elapsed()
    );

    for row in TABLE {
        let out = net.predict(&row[..3]).expect("predict failed");
        println!(
            "{:>4}({}, {}) -> {:.4} (expected {})",
            GATES[row[2] as usize], row[0], row[1], out[0], row[3]
        );
    }
}
