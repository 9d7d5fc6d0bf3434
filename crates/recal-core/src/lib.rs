//! # recal-core
//!
//! Shared foundation for the recal calibration engine: the persisted data
//! model, per-subsystem error enums, layered configuration, the guarded
//! scorer-identifier registry, and tracing setup.

pub mod config;
pub mod errors;
pub mod observability;
pub mod scorer;
pub mod types;

pub use config::{BackendKind, RecalConfig};
pub use errors::{ConfigError, StoreError, TrainError};
pub use scorer::{ScorerModels, ScorerRegistry};
