//! Shared data model: feedback records, calibration profiles, storage keys,
//! and the training request/report surface.

pub mod feedback;
pub mod key;
pub mod profile;
pub mod request;

pub use feedback::{FeedbackRecord, ModelSignals};
pub use key::DocKey;
pub use profile::{
    CalibrationMetrics, CalibrationProfile, EvalRun, IsotonicMap, PlattParams, ProfileBundle,
};
pub use request::{Algo, ExtractionSummary, Scope, TrainReport, TrainRequest, TrainedAlgos};
