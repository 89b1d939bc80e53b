//! Trains briefly, snapshots the model to a JSON file, loads it back and
//! shows that the restored network predicts identically.

use garnet_nn::{Network, NetworkConfig, TrainingData};

fn main() {
    let mut td = TrainingData::new(2_000, 0.8, 0.05);
    // XOR only, for a quick run.
    td.add_row(vec![0.0, 0.0], vec![0.0]);
    td.add_row(vec![0.0, 1.0], vec![1.0]);
    td.add_row(vec![1.0, 0.0], vec![1.0]);
    td.add_row(vec![1.0, 1.0], vec![0.0]);

    let cfg = NetworkConfig::new(vec![2, 4, 1]);
    let mut net = Network::new(&cfg).expect("valid configuration");
    net.train(&mut td).expect("training failed");

    let path = std::env::temp_dir().join("garnet-nn-demo.json");
    let path = path.to_string_lossy();
    net.save_json(&path).expect("save failed");
    let mut restored = Network::load_json(&path).expect("load failed");

    for input in [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]] {
        let a = net.predict(&input).expect("predict failed");
        let b = restored.predict(&input).expect("predict failed");
        println!("{input:?} -> {:.6} | restored {:.6}", a[0], b[0]);
        assert_eq!(a, b);
    }
    println!("snapshot written to {path}");
}
