pub mod config;
pub mod network;
pub mod save_data;

pub use config::NetworkConfig;
pub use network::Network;
pub use save_data::SaveData;
