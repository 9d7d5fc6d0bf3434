//! Local single-file backend.
//!
//! The entire store is one JSON mapping from storage path to document,
//! serialized as a whole. Every mutating call is a whole-file read-then-write
//! with no lock; concurrent writers may silently lose updates (accepted
//! last-writer-wins policy). A file that goes missing or corrupt after
//! construction is fatal for that call, with no retry.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use recal_core::config::BackendKind;
use recal_core::errors::StoreError;
use recal_core::types::{DocKey, EvalRun, FeedbackRecord};

use crate::document::{merge_shallow, Document};
use crate::{FeedbackStore, ListScope};

/// Single-file JSON store.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Open the store, creating an empty `{}` file if none exists.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            std::fs::write(path, "{}\n").map_err(|e| StoreError::Io {
                path: path.display().to_string(),
                message: format!("initialize store file: {e}"),
            })?;
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| StoreError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn write_all(&self, data: &Map<String, Value>) -> Result<(), StoreError> {
        let content =
            serde_json::to_string_pretty(data).map_err(|e| StoreError::Serialize {
                message: e.to_string(),
            })?;
        std::fs::write(&self.path, content).map_err(|e| StoreError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn record_from_entry(path: &str, value: &Value) -> Option<FeedbackRecord> {
        match DocKey::parse_feedback_path(path) {
            Some(DocKey::Feedback { uid, id }) => {
                Some(FeedbackRecord::from_document(&uid, &id, value.clone()))
            }
            _ => None,
        }
    }
}

impl FeedbackStore for LocalStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn get(&self, key: &DocKey) -> Result<Document, StoreError> {
        let data = self.read_all()?;
        match data.get(&key.storage_path()) {
            Some(Value::Object(doc)) => Ok(doc.clone()),
            _ => Ok(Document::new()),
        }
    }

    fn set(&self, key: &DocKey, doc: Document, merge: bool) -> Result<(), StoreError> {
        let mut data = self.read_all()?;
        let path = key.storage_path();
        let next = match (merge, data.get(&path)) {
            (true, Some(Value::Object(existing))) => {
                let mut merged = existing.clone();
                merge_shallow(&mut merged, doc);
                merged
            }
            _ => doc,
        };
        data.insert(path, Value::Object(next));
        self.write_all(&data)
    }

    fn list_feedback(
        &self,
        scope: &ListScope,
        limit: usize,
    ) -> Result<Vec<FeedbackRecord>, StoreError> {
        let data = self.read_all()?;
        let records = match scope {
            ListScope::User(uid) => {
                let prefix = format!("users/{uid}/feedback/");
                data.iter()
                    .filter(|(path, _)| path.starts_with(&prefix))
                    .filter_map(|(path, value)| Self::record_from_entry(path, value))
                    .take(limit)
                    .collect()
            }
            ListScope::AllUsers => data
                .iter()
                .filter_map(|(path, value)| Self::record_from_entry(path, value))
                .take(limit)
                .collect(),
        };
        Ok(records)
    }

    fn latest_eval_run(&self) -> Result<Option<EvalRun>, StoreError> {
        let data = self.read_all()?;
        let latest = data
            .iter()
            .filter(|(path, _)| DocKey::parse_eval_run_path(path).is_some())
            .max_by(|(a, _), (b, _)| a.cmp(b));
        match latest {
            Some((path, value)) => {
                let run = serde_json::from_value(value.clone()).map_err(|e| {
                    StoreError::Corrupt {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?;
                Ok(Some(run))
            }
            None => Ok(None),
        }
    }
}
