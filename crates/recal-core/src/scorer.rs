//! Active scorer-model identifiers behind a guarded swap.
//!
//! The external scorer owns the model weights; recal only tracks which model
//! identifiers are currently active. That is process-wide mutable state, so
//! it lives in a single mutex-protected holder exchanged atomically instead
//! of loose globals. Readers get a cheap `Arc` snapshot and never observe a
//! half-applied swap.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::config::ScorerConfig;

/// Identifiers of the scorer models currently in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerModels {
    pub zsl_model: String,
    pub nli_model: String,
}

/// Guarded holder for the active [`ScorerModels`].
pub struct ScorerRegistry {
    active: Mutex<Arc<ScorerModels>>,
}

impl ScorerRegistry {
    pub fn new(config: &ScorerConfig) -> Self {
        Self {
            active: Mutex::new(Arc::new(ScorerModels {
                zsl_model: config.zsl_model.clone(),
                nli_model: config.nli_model.clone(),
            })),
        }
    }

    /// Snapshot of the active model identifiers.
    pub fn current(&self) -> Arc<ScorerModels> {
        match self.active.lock() {
            Ok(guard) => Arc::clone(&guard),
            // A poisoned lock still holds a consistent Arc; recover it.
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swap the active identifiers. `None` keeps the current value for that
    /// slot. Returns the identifiers in effect after the swap.
    pub fn swap(&self, zsl_model: Option<String>, nli_model: Option<String>) -> Arc<ScorerModels> {
        let mut guard = match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = ScorerModels {
            zsl_model: zsl_model.unwrap_or_else(|| guard.zsl_model.clone()),
            nli_model: nli_model.unwrap_or_else(|| guard.nli_model.clone()),
        };
        *guard = Arc::new(next);
        Arc::clone(&guard)
    }
}

impl Default for ScorerRegistry {
    fn default() -> Self {
        Self::new(&ScorerConfig::default())
    }
}
