//! Typed storage keys.
//!
//! Documents are addressed by a hierarchical string path convention at the
//! persistence boundary; inside the engine every address is a `DocKey` so
//! path formatting mistakes cannot leak past this module.

use std::fmt;

/// A typed document address, mapped to the storage path convention only here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocKey {
    /// `calibration/global`
    CalibrationGlobal,
    /// `users/{uid}/calibration/current`
    CalibrationUser { uid: String },
    /// `users/{uid}/feedback/{id}`
    Feedback { uid: String, id: String },
    /// `eval_runs/{id}`
    EvalRun { id: String },
}

impl DocKey {
    /// Render the storage path for this key.
    pub fn storage_path(&self) -> String {
        match self {
            Self::CalibrationGlobal => "calibration/global".to_string(),
            Self::CalibrationUser { uid } => format!("users/{uid}/calibration/current"),
            Self::Feedback { uid, id } => format!("users/{uid}/feedback/{id}"),
            Self::EvalRun { id } => format!("eval_runs/{id}"),
        }
    }

    /// Parse a feedback path (`users/{uid}/feedback/{id}`) back into a key.
    ///
    /// The local backend uses this to recognize feedback documents during a
    /// full-store scan. Paths outside the convention return `None`.
    pub fn parse_feedback_path(path: &str) -> Option<DocKey> {
        let mut parts = path.split('/');
        match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some("users"), Some(uid), Some("feedback"), Some(id), None)
                if !uid.is_empty() && !id.is_empty() =>
            {
                Some(DocKey::Feedback {
                    uid: uid.to_string(),
                    id: id.to_string(),
                })
            }
            _ => None,
        }
    }

    /// Parse an eval-run path (`eval_runs/{id}`) back into a key.
    pub fn parse_eval_run_path(path: &str) -> Option<DocKey> {
        let id = path.strip_prefix("eval_runs/")?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(DocKey::EvalRun { id: id.to_string() })
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_storage_convention() {
        assert_eq!(DocKey::CalibrationGlobal.storage_path(), "calibration/global");
        assert_eq!(
            DocKey::CalibrationUser { uid: "u1".into() }.storage_path(),
            "users/u1/calibration/current"
        );
        assert_eq!(
            DocKey::Feedback { uid: "u1".into(), id: "m9".into() }.storage_path(),
            "users/u1/feedback/m9"
        );
        assert_eq!(
            DocKey::EvalRun { id: "2025-07-01T00:00:00.000Z".into() }.storage_path(),
            "eval_runs/2025-07-01T00:00:00.000Z"
        );
    }

    #[test]
    fn feedback_paths_round_trip() {
        let key = DocKey::parse_feedback_path("users/u1/feedback/m9").unwrap();
        assert_eq!(key, DocKey::Feedback { uid: "u1".into(), id: "m9".into() });
    }

    #[test]
    fn non_feedback_paths_are_rejected() {
        assert!(DocKey::parse_feedback_path("calibration/global").is_none());
        assert!(DocKey::parse_feedback_path("users/u1/calibration/current").is_none());
        assert!(DocKey::parse_feedback_path("users/u1/feedback/a/b").is_none());
        assert!(DocKey::parse_feedback_path("users//feedback/m9").is_none());
    }

    #[test]
    fn eval_run_paths_round_trip() {
        let key = DocKey::parse_eval_run_path("eval_runs/abc").unwrap();
        assert_eq!(key, DocKey::EvalRun { id: "abc".into() });
        assert!(DocKey::parse_eval_run_path("eval_runs/").is_none());
        assert!(DocKey::parse_eval_run_path("users/u1/feedback/m9").is_none());
    }
}
