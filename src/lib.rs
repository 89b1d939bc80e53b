pub mod activation;
pub mod data;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;

// Convenience re-exports
pub use activation::activation::Activation;
pub use data::training_data::{DataRow, TrainingData};
pub use error::{Error, Result};
pub use loss::error_function::ErrorFunction;
pub use math::matrix::Matrix;
pub use network::config::NetworkConfig;
pub use network::network::Network;
pub use network::save_data::SaveData;
