//! Training orchestration: fetch -> extract -> fit -> evaluate -> persist.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use recal_core::errors::{StoreError, TrainError};
use recal_core::types::{
    CalibrationProfile, DocKey, EvalRun, ProfileBundle, Scope, TrainReport, TrainRequest,
    TrainedAlgos,
};
use recal_store::{Document, FeedbackStore, ListScope};

use crate::calibrate::{isotonic, platt};
use crate::extract;
use crate::metrics;

/// Upper bound on rows fetched for one training run.
const LIST_LIMIT: usize = 10_000;

/// Floor under the caller-supplied minimum sample count.
const HARD_MIN_SAMPLES: usize = 5;

/// Runs calibration training against an injected store backend.
pub struct CalibrationTrainer {
    store: Box<dyn FeedbackStore>,
}

impl CalibrationTrainer {
    pub fn new(store: Box<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn FeedbackStore {
        self.store.as_ref()
    }

    /// Run one training pass and persist its outputs.
    ///
    /// Writes the scope's profile as a full overwrite (versioned by the run
    /// timestamp) and appends an immutable eval-run record. Concurrent runs
    /// against the same scope race read-modify-write; last writer wins by
    /// policy.
    pub fn train(&self, request: &TrainRequest) -> Result<TrainReport, TrainError> {
        request.validate()?;

        let list_scope = match request.scope {
            Scope::User => {
                // validate() guarantees the uid is present here.
                let uid = request.uid.clone().unwrap_or_default();
                ListScope::User(uid)
            }
            // A global run needs every user's feedback; the remote backend
            // rejects this rather than training on partial data.
            Scope::Global => ListScope::AllUsers,
        };
        let rows = self.store.list_feedback(&list_scope, LIST_LIMIT)?;
        if rows.is_empty() {
            return Err(TrainError::NoFeedbackSamples);
        }

        let pairs = extract::extract(&rows);
        let n = pairs.len();
        if n < request.min_samples.max(HARD_MIN_SAMPLES) {
            return Err(TrainError::InsufficientSamples {
                found: n,
                min_samples: request.min_samples,
            });
        }
        debug!(
            scope = request.scope.name(),
            rows = rows.len(),
            pairs = n,
            entropy_avg = pairs.summary.entropy_avg,
            "training pairs extracted"
        );

        let platt_params = request
            .algo
            .fits_platt()
            .then(|| platt::fit(&pairs.ps, &pairs.ys));
        let isotonic_map = request
            .algo
            .fits_isotonic()
            .then(|| isotonic::fit(&pairs.ps, &pairs.ys));
        let computed = metrics::compute(&pairs.ps, &pairs.ys);

        let now = now_stamp();
        let profile = CalibrationProfile {
            scope: request.scope.name().to_string(),
            version: now.clone(),
            sample_count: n as u64,
            platt: platt_params,
            isotonic: isotonic_map,
            metrics: computed,
            updated_at: now.clone(),
        };
        let profile_key = match request.scope {
            Scope::Global => DocKey::CalibrationGlobal,
            Scope::User => DocKey::CalibrationUser {
                uid: request.uid.clone().unwrap_or_default(),
            },
        };
        self.store
            .set(&profile_key, to_document(&profile)?, false)?;

        let run = EvalRun {
            run_id: now.clone(),
            scope: match request.scope {
                Scope::Global => "global".to_string(),
                Scope::User => format!("user:{}", request.uid.as_deref().unwrap_or_default()),
            },
            sample_count: n as u64,
            metrics: computed,
            updated_at: now.clone(),
        };
        self.store
            .set(&DocKey::EvalRun { id: now.clone() }, to_document(&run)?, false)?;

        info!(
            scope = request.scope.name(),
            samples = n,
            ece = computed.ece,
            brier = computed.brier,
            eval_run_id = %now,
            "calibration training run persisted"
        );

        Ok(TrainReport {
            ok: true,
            scope: request.scope,
            uid: request.uid.clone(),
            algo: request.algo,
            trained: TrainedAlgos {
                platt: profile.platt.is_some(),
                isotonic: profile.isotonic.is_some(),
            },
            metrics: computed,
            extra: pairs.summary,
            eval_run_id: now,
        })
    }

    /// Fetch the global profile plus the given user's personal profile.
    pub fn profiles(&self, uid: Option<&str>) -> Result<ProfileBundle, StoreError> {
        let global = self.read_profile(&DocKey::CalibrationGlobal)?;
        let personal = match uid {
            Some(uid) if !uid.is_empty() => {
                self.read_profile(&DocKey::CalibrationUser { uid: uid.to_string() })?
            }
            _ => None,
        };
        Ok(ProfileBundle { global, personal })
    }

    /// Most recent eval run, where the active backend supports id-ordered
    /// scans (local only).
    pub fn latest_eval(&self) -> Result<Option<EvalRun>, StoreError> {
        self.store.latest_eval_run()
    }

    fn read_profile(&self, key: &DocKey) -> Result<Option<CalibrationProfile>, StoreError> {
        let doc = self.store.get(key)?;
        if doc.is_empty() {
            return Ok(None);
        }
        serde_json::from_value(Value::Object(doc))
            .map(Some)
            .map_err(|e| StoreError::Serialize {
                message: format!("profile at {key}: {e}"),
            })
    }
}

/// Last issued stamp in epoch milliseconds. Eval runs are keyed by stamp, so
/// two runs in the same millisecond must not share one.
static LAST_STAMP_MS: AtomicI64 = AtomicI64::new(0);

/// Millisecond-precision UTC timestamp, strictly increasing per process.
/// Doubles as the profile version and the eval-run id; lexicographic order
/// is chronological order.
fn now_stamp() -> String {
    let now_ms = Utc::now().timestamp_millis();
    let stamp_ms = match LAST_STAMP_MS.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(last.max(now_ms - 1) + 1)
    }) {
        Ok(prev) => prev.max(now_ms - 1) + 1,
        Err(_) => now_ms,
    };
    DateTime::<Utc>::from_timestamp_millis(stamp_ms)
        .unwrap_or_else(Utc::now)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

fn to_document<T: serde::Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(other) => Err(StoreError::Serialize {
            message: format!("expected a JSON object, got {other}"),
        }),
        Err(e) => Err(StoreError::Serialize {
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_millisecond_utc_and_strictly_increasing() {
        let a = now_stamp();
        let b = now_stamp();
        assert!(a.ends_with('Z'));
        // "2025-07-01T00:00:00.000Z" is 24 chars.
        assert_eq!(a.len(), 24);
        assert!(b > a, "stamps must not repeat: {a} vs {b}");
    }
}
