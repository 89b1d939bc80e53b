use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One labelled sample: an input vector sized to the network's input layer
/// and a target vector sized to its output layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
}

/// Owns the raw dataset and produces shuffled train/test partitions plus a
/// forward cursor over the training partition.
///
/// Rows are stored once; the partitions are index vectors into the row
/// storage, recomputed by every `prepare` call. The cursor belongs to the
/// training partition only and is reset by `prepare` and at each epoch end.
#[derive(Debug)]
pub struct TrainingData {
    rows: Vec<DataRow>,
    train_indices: Vec<usize>,
    test_indices: Vec<usize>,
    /// Fraction of rows assigned to the training partition, in (0, 1].
    pub split: f64,
    /// Maximum number of epochs the training loop will run.
    pub iterations: u32,
    /// Early-stop threshold for the per-row and mean test error.
    pub target_error: f64,
    cursor: usize,
    rng: StdRng,
}

impl TrainingData {
    /// Creates an empty dataset with an entropy-seeded random source.
    pub fn new(iterations: u32, split: f64, target_error: f64) -> TrainingData {
        TrainingData::with_rng(iterations, split, target_error, StdRng::from_entropy())
    }

    /// Creates an empty dataset with a deterministic random source, so that
    /// `prepare` and `random_training_row` are reproducible.
    pub fn seeded(iterations: u32, split: f64, target_error: f64, seed: u64) -> TrainingData {
        TrainingData::with_rng(iterations, split, target_error, StdRng::seed_from_u64(seed))
    }

    fn with_rng(iterations: u32, split: f64, target_error: f64, rng: StdRng) -> TrainingData {
        TrainingData {
            rows: Vec::new(),
            train_indices: Vec::new(),
            test_indices: Vec::new(),
            split,
            iterations,
            target_error,
            cursor: 0,
            rng,
        }
    }

    /// Appends a sample. No validation against any network topology happens
    /// here; feed-forward rejects mis-sized rows when they are used.
    pub fn add_row(&mut self, input: Vec<f64>, output: Vec<f64>) {
        self.rows.push(DataRow { input, output });
    }

    /// Shuffles the rows and splits them into disjoint train/test
    /// partitions; `round(len * split)` rows go to training, the remainder
    /// to testing. Resets the epoch cursor.
    ///
    /// The shuffle is a fresh random permutation on every call, built by
    /// pairwise index swaps.
    pub fn prepare(&mut self) {
        self.train_indices.clear();
        self.test_indices.clear();
        self.cursor = 0;

        if self.rows.is_empty() {
            return;
        }

        let train_count =
            ((self.rows.len() as f64 * self.split).round() as usize).min(self.rows.len());

        let mut index: Vec<usize> = (0..self.rows.len()).collect();
        for _ in 0..index.len() {
            let p1 = self.rng.gen_range(0..index.len());
            let p2 = self.rng.gen_range(0..index.len());
            index.swap(p1, p2);
        }

        self.train_indices.extend_from_slice(&index[..train_count]);
        self.test_indices.extend_from_slice(&index[train_count..]);
    }

    /// Returns the training row under the cursor and advances it. Once the
    /// partition is exhausted the cursor resets and `None` is returned as
    /// the end-of-epoch sentinel; the next call starts the next epoch with
    /// an identical row order.
    pub fn next_row(&mut self) -> Option<&DataRow> {
        if self.cursor >= self.train_indices.len() {
            self.cursor = 0;
            return None;
        }
        let row = &self.rows[self.train_indices[self.cursor]];
        self.cursor += 1;
        Some(row)
    }

    /// Returns a uniformly random training row, independent of the cursor.
    pub fn random_training_row(&mut self) -> Option<&DataRow> {
        if self.train_indices.is_empty() {
            return None;
        }
        let i = self.rng.gen_range(0..self.train_indices.len());
        Some(&self.rows[self.train_indices[i]])
    }

    /// Iterates the test partition in order.
    pub fn test_data(&self) -> impl Iterator<Item = &DataRow> {
        self.test_indices.iter().map(|&i| &self.rows[i])
    }

    /// Number of rows in the training partition.
    pub fn training_count(&self) -> usize {
        self.train_indices.len()
    }

    /// Number of rows in the test partition.
    pub fn test_count(&self) -> usize {
        self.test_indices.len()
    }

    /// Total number of rows added so far.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twenty_rows() -> TrainingData {
        let mut td = TrainingData::seeded(10, 0.8, 0.1, 7);
        for i in 0..20 {
            td.add_row(vec![i as f64], vec![i as f64 * 10.0]);
        }
        td
    }

    #[test]
    fn prepare_splits_by_rounded_ratio() {
        let mut td = twenty_rows();
        td.prepare();
        assert_eq!(td.training_count(), 16);
        assert_eq!(td.test_count(), 4);
    }

    #[test]
    fn partitions_are_a_permutation_of_the_rows() {
        let mut td = twenty_rows();
        td.prepare();

        let mut seen: Vec<f64> = Vec::new();
        while let Some(row) = td.next_row() {
            seen.push(row.input[0]);
        }
        let test_inputs: Vec<f64> = td.test_data().map(|r| r.input[0]).collect();
        seen.extend(test_inputs);

        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<f64> = (0..20).map(|i| i as f64).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn next_row_cycles_identically_each_epoch() {
        let mut td = twenty_rows();
        td.prepare();

        let mut first_epoch = Vec::new();
        while let Some(row) = td.next_row() {
            first_epoch.push(row.input[0]);
        }
        assert_eq!(first_epoch.len(), 16);

        let mut second_epoch = Vec::new();
        while let Some(row) = td.next_row() {
            second_epoch.push(row.input[0]);
        }
        assert_eq!(first_epoch, second_epoch);
    }

    #[test]
    fn seeded_prepare_is_deterministic() {
        let mut a = twenty_rows();
        let mut b = twenty_rows();
        a.prepare();
        b.prepare();

        let order_a: Vec<f64> = std::iter::from_fn(|| a.next_row().map(|r| r.input[0])).collect();
        let order_b: Vec<f64> = std::iter::from_fn(|| b.next_row().map(|r| r.input[0])).collect();
        assert_eq!(order_a, order_b);
    }

    #[test]
    fn full_split_leaves_test_partition_empty() {
        let mut td = TrainingData::seeded(10, 1.0, 0.1, 1);
        for i in 0..5 {
            td.add_row(vec![i as f64], vec![0.0]);
        }
        td.prepare();
        assert_eq!(td.training_count(), 5);
        assert_eq!(td.test_count(), 0);
    }

    #[test]
    fn random_training_row_draws_from_training_partition() {
        let mut td = twenty_rows();
        td.prepare();
        let test_inputs: Vec<f64> = td.test_data().map(|r| r.input[0]).collect();
        for _ in 0..50 {
            let row = td.random_training_row().unwrap().clone();
            assert!(!test_inputs.contains(&row.input[0]));
        }
    }

    #[test]
    fn empty_dataset_prepares_cleanly() {
        let mut td = TrainingData::new(10, 0.8, 0.1);
        td.prepare();
        assert_eq!(td.training_count(), 0);
        assert!(td.next_row().is_none());
        assert!(td.random_training_row().is_none());
    }
}
