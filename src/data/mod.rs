pub mod training_data;

pub use training_data::{DataRow, TrainingData};
