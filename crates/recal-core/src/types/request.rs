//! Training request and report shapes.

use serde::{Deserialize, Serialize};

use super::profile::CalibrationMetrics;
use crate::errors::ConfigError;

/// Which calibration document a training run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    User,
}

impl Scope {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::User => "user",
        }
    }

    /// Parse an externally supplied scope string.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "global" => Ok(Self::Global),
            "user" => Ok(Self::User),
            other => Err(ConfigError::InvalidScope(other.to_string())),
        }
    }
}

/// Which calibrator(s) to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algo {
    Platt,
    Isotonic,
    Both,
}

impl Algo {
    pub fn fits_platt(&self) -> bool {
        matches!(self, Self::Platt | Self::Both)
    }

    pub fn fits_isotonic(&self) -> bool {
        matches!(self, Self::Isotonic | Self::Both)
    }
}

/// A request to run calibration training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainRequest {
    #[serde(default = "default_scope")]
    pub scope: Scope,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default = "default_algo")]
    pub algo: Algo,
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
}

fn default_scope() -> Scope {
    Scope::Global
}

fn default_algo() -> Algo {
    Algo::Both
}

fn default_min_samples() -> usize {
    20
}

impl Default for TrainRequest {
    fn default() -> Self {
        Self {
            scope: Scope::Global,
            uid: None,
            algo: Algo::Both,
            min_samples: default_min_samples(),
        }
    }
}

impl TrainRequest {
    /// Validate the scope/uid combination. User scope requires a uid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scope == Scope::User && self.uid.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::UidRequired);
        }
        Ok(())
    }
}

/// Which calibrators a run actually fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrainedAlgos {
    pub platt: bool,
    pub isotonic: bool,
}

/// Extraction summary carried alongside the metrics in a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ExtractionSummary {
    pub entropy_avg: f64,
}

/// Structured result of a successful training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub ok: bool,
    pub scope: Scope,
    pub uid: Option<String>,
    pub algo: Algo,
    pub trained: TrainedAlgos,
    pub metrics: CalibrationMetrics,
    pub extra: ExtractionSummary,
    pub eval_run_id: String,
}
