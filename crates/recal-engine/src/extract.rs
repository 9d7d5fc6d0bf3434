//! Training-pair extraction from raw feedback records.

use recal_core::types::{ExtractionSummary, FeedbackRecord};

use crate::calibrate::clamp01;

/// Supervised training pairs derived from feedback history. Ephemeral —
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct TrainingPairs {
    pub ps: Vec<f64>,
    pub ys: Vec<u8>,
    pub summary: ExtractionSummary,
}

impl TrainingPairs {
    pub fn len(&self) -> usize {
        self.ps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ps.is_empty()
    }
}

/// Rating at or above this counts as a positive outcome.
const POSITIVE_RATING: f64 = 4.0;

/// Convert feedback rows into (probability, outcome) pairs.
///
/// Probability: `model.p_final_raw` when present, clamped to [0, 1].
/// Otherwise a composite fallback averages three terms: an emotion-confidence
/// proxy (`1 - hf_entropy`), a belief-consistency proxy
/// (`max(0, hf_entail - hf_contradict)`), and a fixed 0.5 placeholder for the
/// unmodeled third dimension. The placeholder is a deliberate approximation
/// kept for compatibility, not an estimator.
///
/// Outcome: `y = 1` iff a rating is present and >= 4. A missing rating maps
/// to `y = 0`, conflating "no feedback" with explicit negative feedback —
/// known bias toward underconfidence, kept as-is pending product review.
pub fn extract(rows: &[FeedbackRecord]) -> TrainingPairs {
    let mut pairs = TrainingPairs {
        ps: Vec::with_capacity(rows.len()),
        ys: Vec::with_capacity(rows.len()),
        summary: ExtractionSummary::default(),
    };

    let mut entropy_sum = 0.0;
    for row in rows {
        let signals = &row.model;
        let p = match signals.p_final_raw {
            Some(p) => p,
            None => {
                let emotions = clamp01(1.0 - signals.hf_entropy);
                let core = (signals.hf_entail - signals.hf_contradict).max(0.0);
                let distort = 0.5;
                (emotions + core + distort) / 3.0
            }
        };
        let y = match row.rating {
            Some(rating) if rating >= POSITIVE_RATING => 1,
            _ => 0,
        };

        pairs.ps.push(clamp01(p));
        pairs.ys.push(y);
        entropy_sum += signals.hf_entropy;
    }

    if !rows.is_empty() {
        pairs.summary.entropy_avg = entropy_sum / rows.len() as f64;
    }
    pairs
}
