//! Feedback records as written by the external feedback collector.
//!
//! These documents are owned by the collector; recal reads them and never
//! writes them back. Unknown fields round-trip through `extra` so a record
//! deserialized here stays faithful to what is stored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Scalar signals the external scorer embedded in a feedback record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSignals {
    /// Final raw probability the scorer assigned, if it recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_final_raw: Option<f64>,
    /// Normalized entropy of the emotion distribution, in [0, 1].
    #[serde(default = "default_entropy")]
    pub hf_entropy: f64,
    /// NLI entailment score for the core-belief hypothesis.
    #[serde(default)]
    pub hf_entail: f64,
    /// NLI contradiction score for the core-belief hypothesis.
    #[serde(default)]
    pub hf_contradict: f64,
}

/// Missing entropy reads as maximal uncertainty about the distribution shape,
/// which the composite fallback treats as a 0.5 confidence proxy.
fn default_entropy() -> f64 {
    0.5
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self {
            p_final_raw: None,
            hf_entropy: default_entropy(),
            hf_entail: 0.0,
            hf_contradict: 0.0,
        }
    }
}

/// One feedback document: scorer signals plus an optional 1-5 user rating.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedbackRecord {
    /// Document id, injected from the storage key on listing.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Owning user id, injected from the storage key on listing.
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub model: ModelSignals,
    /// User rating in 1..=5, absent when the user gave no feedback.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "dateKey", default, skip_serializing_if = "Option::is_none")]
    pub date_key: Option<String>,
    /// Collector-owned fields recal does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeedbackRecord {
    /// Deserialize a stored document, injecting the key-derived identity.
    pub fn from_document(uid: &str, id: &str, doc: Value) -> Self {
        let mut record: FeedbackRecord = serde_json::from_value(doc).unwrap_or_default();
        record.id = id.to_string();
        record.uid = uid.to_string();
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_signals_fall_back_to_defaults() {
        let record = FeedbackRecord::from_document("u1", "m1", json!({}));
        assert_eq!(record.uid, "u1");
        assert_eq!(record.id, "m1");
        assert!(record.model.p_final_raw.is_none());
        assert_eq!(record.model.hf_entropy, 0.5);
        assert_eq!(record.model.hf_entail, 0.0);
        assert!(record.rating.is_none());
    }

    #[test]
    fn collector_fields_are_preserved() {
        let record = FeedbackRecord::from_document(
            "u1",
            "m1",
            json!({
                "model": { "p_final_raw": 0.8, "hf_entropy": 0.2 },
                "rating": 5,
                "dateKey": "2025-07-01",
                "is_baseline": true
            }),
        );
        assert_eq!(record.model.p_final_raw, Some(0.8));
        assert_eq!(record.rating, Some(5.0));
        assert_eq!(record.date_key.as_deref(), Some("2025-07-01"));
        assert_eq!(record.extra.get("is_baseline"), Some(&json!(true)));
    }
}
