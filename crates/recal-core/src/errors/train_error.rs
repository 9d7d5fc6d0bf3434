//! Training-run errors.

use super::{ConfigError, StoreError};

/// Errors raised by a calibration training run.
///
/// Degenerate numeric cases (single-class correlation, empty metric input)
/// are handled by defaulting inside the metrics engine and never surface
/// here.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No feedback samples available for training")]
    NoFeedbackSamples,

    #[error("Insufficient samples: found {found}, need at least {min_samples}")]
    InsufficientSamples { found: usize, min_samples: usize },
}
