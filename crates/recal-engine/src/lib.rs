//! # recal-engine
//!
//! The calibration engine: extracts (probability, outcome) pairs from
//! feedback history, fits Platt and binned-isotonic remappings, computes
//! calibration-quality metrics, and orchestrates training runs end to end.

pub mod calibrate;
pub mod extract;
pub mod metrics;
pub mod service;
pub mod trainer;

pub use extract::{extract, TrainingPairs};
pub use service::{CalibrationService, Health};
pub use trainer::CalibrationTrainer;
