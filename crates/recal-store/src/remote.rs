//! Remote document-service backend.
//!
//! Talks to a hosted document API over HTTP with bearer-token auth. The
//! service provides per-document atomicity; listing is only available scoped
//! to a single uid, so an all-users scan surfaces
//! [`StoreError::GlobalScanUnsupported`] instead of partial data. Per-call
//! errors propagate as-is; there is no retry layer here.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use recal_core::config::{BackendKind, RemoteConfig};
use recal_core::errors::StoreError;
use recal_core::types::{DocKey, EvalRun, FeedbackRecord};

use crate::document::Document;
use crate::{FeedbackStore, ListScope};

const CALL_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the remote document service.
#[derive(Debug)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<ListedDocument>,
}

#[derive(Debug, Deserialize)]
struct ListedDocument {
    id: String,
    #[serde(default)]
    doc: Value,
}

impl RemoteStore {
    /// Construct a client from resolved credentials.
    ///
    /// Fails when the credentials are unusable (empty key, unparseable base
    /// URL) or the HTTP client cannot be built. The selection layer treats
    /// any failure here as grounds for demotion to the local backend.
    pub fn connect(config: &RemoteConfig) -> Result<Self, StoreError> {
        if config.api_key.is_empty() {
            return Err(StoreError::Remote {
                status: 0,
                message: "remote api_key is empty".to_string(),
            });
        }
        reqwest::Url::parse(&config.base_url).map_err(|e| StoreError::Remote {
            status: 0,
            message: format!("invalid remote base_url {:?}: {e}", config.base_url),
        })?;
        let client = Client::builder()
            .timeout(CALL_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Remote {
                status: 0,
                message: format!("build http client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn document_url(&self, key: &DocKey) -> String {
        format!("{}/v1/documents/{}", self.base_url, key.storage_path())
    }

    fn transport_error(e: reqwest::Error) -> StoreError {
        StoreError::Remote {
            status: e.status().map_or(0, |s| s.as_u16()),
            message: e.to_string(),
        }
    }

    fn status_error(status: StatusCode, body: String) -> StoreError {
        StoreError::Remote {
            status: status.as_u16(),
            message: body,
        }
    }
}

impl FeedbackStore for RemoteStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    fn get(&self, key: &DocKey) -> Result<Document, StoreError> {
        let response = self
            .client
            .get(self.document_url(key))
            .bearer_auth(&self.api_key)
            .send()
            .map_err(Self::transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(Document::new()),
            status if status.is_success() => {
                response.json::<Document>().map_err(Self::transport_error)
            }
            status => Err(Self::status_error(
                status,
                response.text().unwrap_or_default(),
            )),
        }
    }

    fn set(&self, key: &DocKey, doc: Document, merge: bool) -> Result<(), StoreError> {
        let url = self.document_url(key);
        // PATCH asks the service for a shallow field merge; PUT replaces.
        let request = if merge {
            self.client.patch(url)
        } else {
            self.client.put(url)
        };
        let response = request
            .bearer_auth(&self.api_key)
            .json(&doc)
            .send()
            .map_err(Self::transport_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(
                status,
                response.text().unwrap_or_default(),
            ))
        }
    }

    fn list_feedback(
        &self,
        scope: &ListScope,
        limit: usize,
    ) -> Result<Vec<FeedbackRecord>, StoreError> {
        let uid = match scope {
            ListScope::User(uid) => uid,
            ListScope::AllUsers => return Err(StoreError::GlobalScanUnsupported),
        };

        let url = format!("{}/v1/users/{uid}/feedback", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("limit", limit.to_string())])
            .bearer_auth(&self.api_key)
            .send()
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(
                status,
                response.text().unwrap_or_default(),
            ));
        }

        let listed: ListResponse = response.json().map_err(Self::transport_error)?;
        Ok(listed
            .documents
            .into_iter()
            .map(|entry| FeedbackRecord::from_document(uid, &entry.id, entry.doc))
            .collect())
    }

    fn latest_eval_run(&self) -> Result<Option<EvalRun>, StoreError> {
        // The service exposes no id-ordered scan over eval runs.
        Ok(None)
    }
}
