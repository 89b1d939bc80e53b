//! End-to-end training on the 20-row AND/OR/XOR/NAND/NOR truth table.
//!
//! Each row is (bit-A, bit-B, selector, expected) where the selector picks
//! the gate: 0 = AND, 1 = OR, 2 = XOR, 3 = NAND, 4 = NOR.

use garnet_nn::{ErrorFunction, Network, NetworkConfig, TrainingData};

#[rustfmt::skip]
const TABLE: [[f64; 4]; 20] = [
    [0.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0], [1.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 0.0], [0.0, 1.0, 1.0, 1.0], [1.0, 0.0, 1.0, 1.0], [1.0, 1.0, 1.0, 1.0],
    [0.0, 0.0, 2.0, 0.0], [0.0, 1.0, 2.0, 1.0], [1.0, 0.0, 2.0, 1.0], [1.0, 1.0, 2.0, 0.0],
    [0.0, 0.0, 3.0, 1.0], [0.0, 1.0, 3.0, 1.0], [1.0, 0.0, 3.0, 1.0], [1.0, 1.0, 3.0, 0.0],
    [0.0, 0.0, 4.0, 1.0], [0.0, 1.0, 4.0, 0.0], [1.0, 0.0, 4.0, 0.0], [1.0, 1.0, 4.0, 0.0],
];

fn dataset(iterations: u32, split: f64, target_error: f64, seed: u64) -> TrainingData {
    let mut td = TrainingData::seeded(iterations, split, target_error, seed);
    for row in TABLE {
        td.add_row(row[..3].to_vec(), row[3..].to_vec());
    }
    td
}

fn mean_test_error(net: &mut Network, td: &TrainingData) -> f64 {
    let mut sum = 0.0;
    for row in td.test_data() {
        let out = net.predict(&row.input).unwrap();
        sum += ErrorFunction::MeanSquaredError.compute(&out, &row.output);
    }
    sum / td.test_count() as f64
}

#[test]
fn test_error_drops_over_early_epochs() {
    let mut td = dataset(3, 0.8, 0.2, 42);
    td.prepare();
    assert_eq!(td.training_count(), 16);
    assert_eq!(td.test_count(), 4);

    let cfg = NetworkConfig::new(vec![3, 4, 1]);
    let mut net = Network::new_seeded(&cfg, 42).unwrap();

    let mut errors = Vec::new();
    for _ in 0..3 {
        while let Some(row) = td.next_row() {
            net.feed_forward(&row.input).unwrap();
            net.back_propagate(&row.output).unwrap();
        }
        errors.push(mean_test_error(&mut net, &td));
    }

    assert!(
        errors[1] <= errors[0] && errors[2] <= errors[1],
        "test error not decreasing: {errors:?}"
    );
}

#[test]
fn trained_network_learns_and_of_zero() {
    let mut td = dataset(20_000, 0.8, 0.05, 42);
    let cfg = NetworkConfig::new(vec![3, 4, 1]);
    let mut net = Network::new_seeded(&cfg, 42).unwrap();

    let mean_error = net.train(&mut td).unwrap();
    assert!(mean_error.is_finite());

    // AND with both bits clear must land on the low side.
    let out = net.predict(&[0.0, 0.0, 0.0]).unwrap();
    assert!(out[0] < 0.5, "predicted {} for AND(0,0)", out[0]);
}

#[test]
fn snapshot_round_trip_preserves_predictions() {
    let mut td = dataset(200, 0.8, 0.05, 3);
    let cfg = NetworkConfig::new(vec![3, 4, 1]);
    let mut net = Network::new_seeded(&cfg, 3).unwrap();
    net.train(&mut td).unwrap();

    let json = net.to_json().unwrap();
    let mut restored = Network::from_json(&json).unwrap();

    for row in TABLE {
        let input = &row[..3];
        let before = net.predict(input).unwrap();
        let after = restored.predict(input).unwrap();
        for (a, b) in before.iter().zip(after.iter()) {
            assert!((a - b).abs() < 1e-12, "round-trip drift: {a} vs {b}");
        }
    }
}
