//! Persisted calibration artifacts: profiles, metrics, and eval runs.
//!
//! Field names and nesting here are the compatibility surface with existing
//! stored documents; renames are wire-format changes, not refactors.

use serde::{Deserialize, Serialize};

/// Platt scaling parameters for `sigma(a * p + b)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattParams {
    pub a: f64,
    pub b: f64,
}

/// Binned monotone map: `edges` has one more entry than `values`, and
/// `values` is non-decreasing after fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsotonicMap {
    pub edges: Vec<f64>,
    pub values: Vec<f64>,
}

/// Calibration-quality and discrimination metrics for one training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CalibrationMetrics {
    /// Expected calibration error over equal-width confidence buckets.
    pub ece: f64,
    /// Mean squared error between probability and outcome.
    pub brier: f64,
    /// 0.5-threshold accuracy.
    pub em: f64,
    pub f1: f64,
    /// Point-biserial correlation between probabilities and outcomes;
    /// 0.0 when the outcomes are single-class.
    pub user_corr: f64,
}

/// A calibration profile, fully overwritten on each successful training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    pub scope: String,
    /// Run timestamp, doubling as the profile version.
    pub version: String,
    /// Number of training pairs used by the run that produced this profile.
    pub sample_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platt: Option<PlattParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isotonic: Option<IsotonicMap>,
    pub metrics: CalibrationMetrics,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Immutable record of one evaluation run. Append-only: never edited or
/// deleted once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalRun {
    /// Timestamp-derived id; lexicographic order is chronological order.
    #[serde(rename = "runId")]
    pub run_id: String,
    pub scope: String,
    pub sample_count: u64,
    pub metrics: CalibrationMetrics,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Profile-fetch response: the global profile plus the per-user one.
/// An absent profile serializes as `{}` for wire compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfileBundle {
    #[serde(default, with = "profile_or_empty")]
    pub global: Option<CalibrationProfile>,
    #[serde(default, with = "profile_or_empty")]
    pub personal: Option<CalibrationProfile>,
}

/// Serializes `None` as an empty object instead of `null`.
mod profile_or_empty {
    use super::CalibrationProfile;
    use serde::de::Deserializer;
    use serde::ser::Serializer;
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value};

    pub fn serialize<S: Serializer>(
        value: &Option<CalibrationProfile>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(profile) => profile.serialize(serializer),
            None => Map::<String, Value>::new().serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<CalibrationProfile>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(None),
            Value::Object(map) if map.is_empty() => Ok(None),
            other => serde_json::from_value(other)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> CalibrationProfile {
        CalibrationProfile {
            scope: "global".into(),
            version: "2025-07-01T00:00:00.000Z".into(),
            sample_count: 42,
            platt: Some(PlattParams { a: 1.5, b: -0.25 }),
            isotonic: Some(IsotonicMap {
                edges: vec![0.0, 0.5, 1.0],
                values: vec![0.2, 0.8],
            }),
            metrics: CalibrationMetrics::default(),
            updated_at: "2025-07-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn wire_names_are_preserved() {
        let doc = serde_json::to_value(profile()).unwrap();
        assert!(doc.get("updatedAt").is_some());
        assert!(doc.get("sample_count").is_some());
        assert_eq!(doc["isotonic"]["edges"], json!([0.0, 0.5, 1.0]));
        assert_eq!(doc["isotonic"]["values"], json!([0.2, 0.8]));

        let run = EvalRun {
            run_id: "r1".into(),
            scope: "global".into(),
            sample_count: 42,
            metrics: CalibrationMetrics::default(),
            updated_at: "now".into(),
        };
        let doc = serde_json::to_value(run).unwrap();
        assert!(doc.get("runId").is_some());
    }

    #[test]
    fn profile_round_trips() {
        let original = profile();
        let doc = serde_json::to_value(&original).unwrap();
        let restored: CalibrationProfile = serde_json::from_value(doc).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn absent_personal_profile_serializes_as_empty_object() {
        let bundle = ProfileBundle {
            global: Some(profile()),
            personal: None,
        };
        let doc = serde_json::to_value(&bundle).unwrap();
        assert_eq!(doc["personal"], json!({}));
        let restored: ProfileBundle = serde_json::from_value(doc).unwrap();
        assert!(restored.personal.is_none());
        assert_eq!(restored.global, bundle.global);
    }
}
