//! Error handling for recal.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod store_error;
pub mod train_error;

pub use config_error::ConfigError;
pub use store_error::StoreError;
pub use train_error::TrainError;
