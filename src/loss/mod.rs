pub mod bce;
pub mod cce;
pub mod error_function;
pub mod mae;
pub mod mse;

pub use bce::BceError;
pub use cce::CceError;
pub use error_function::ErrorFunction;
pub use mae::MaeError;
pub use mse::MseError;
