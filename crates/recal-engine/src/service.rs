//! Service facade bundling the selected store, the trainer, and the scorer
//! registry. Transport (HTTP routing, CORS) stays outside this crate; the
//! facade is the callable surface those layers delegate to.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use recal_core::config::{BackendKind, RecalConfig};
use recal_core::errors::{StoreError, TrainError};
use recal_core::scorer::{ScorerModels, ScorerRegistry};
use recal_core::types::{EvalRun, ProfileBundle, TrainReport, TrainRequest};
use recal_store::{select_backend, FeedbackStore};

use crate::trainer::CalibrationTrainer;

/// Liveness report with the active scorer identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
    pub zsl_model: String,
    pub nli_model: String,
    pub store_backend: String,
}

/// One fully wired calibration service.
pub struct CalibrationService {
    trainer: CalibrationTrainer,
    scorers: ScorerRegistry,
}

impl CalibrationService {
    /// Wire a service from resolved configuration: backend selection happens
    /// here, once, and the chosen store is injected everywhere below.
    pub fn from_config(config: &RecalConfig) -> Result<Self, StoreError> {
        let store = select_backend(&config.store)?;
        Ok(Self::new(store, ScorerRegistry::new(&config.scorer)))
    }

    pub fn new(store: Box<dyn FeedbackStore>, scorers: ScorerRegistry) -> Self {
        Self {
            trainer: CalibrationTrainer::new(store),
            scorers,
        }
    }

    pub fn train(&self, request: &TrainRequest) -> Result<TrainReport, TrainError> {
        self.trainer.train(request)
    }

    pub fn profiles(&self, uid: Option<&str>) -> Result<ProfileBundle, StoreError> {
        self.trainer.profiles(uid)
    }

    pub fn latest_eval(&self) -> Result<Option<EvalRun>, StoreError> {
        self.trainer.latest_eval()
    }

    pub fn health(&self) -> Health {
        let models = self.scorers.current();
        Health {
            ok: true,
            zsl_model: models.zsl_model.clone(),
            nli_model: models.nli_model.clone(),
            store_backend: self.backend().name().to_string(),
        }
    }

    /// Swap the active scorer-model identifiers. Loading the actual model
    /// artifacts is the external scorer's job; this only records which
    /// identifiers are now authoritative.
    pub fn reload_models(
        &self,
        zsl_model: Option<String>,
        nli_model: Option<String>,
    ) -> Arc<ScorerModels> {
        let models = self.scorers.swap(zsl_model, nli_model);
        info!(
            zsl_model = %models.zsl_model,
            nli_model = %models.nli_model,
            "active scorer models swapped"
        );
        models
    }

    pub fn backend(&self) -> BackendKind {
        self.trainer.store().kind()
    }
}
