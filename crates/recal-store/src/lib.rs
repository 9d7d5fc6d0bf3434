//! # recal-store
//!
//! Feedback persistence behind one `FeedbackStore` trait with two backends:
//! a remote document service and a local single-file JSON store. The backend
//! is chosen once at construction (`select_backend`) and injected; call sites
//! never branch on backend mode.

pub mod document;
pub mod local;
pub mod remote;
pub mod select;

use recal_core::config::BackendKind;
use recal_core::errors::StoreError;
use recal_core::types::{DocKey, EvalRun, FeedbackRecord};

pub use document::Document;
pub use local::LocalStore;
pub use remote::RemoteStore;
pub use select::select_backend;

/// Which feedback rows a listing targets.
///
/// Typed rendering of the `uid | "*" | null` parameter: `AllUsers` covers
/// both the wildcard and the absent uid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    /// Feedback for a single user.
    User(String),
    /// Full scan across every user. Only the local backend supports this.
    AllUsers,
}

/// Persistence abstraction over the remote document service and the local
/// single-file store.
pub trait FeedbackStore: Send + Sync {
    /// Which backend this store runs on.
    fn kind(&self) -> BackendKind;

    /// Fetch a document. A missing key yields an empty document, never an
    /// error.
    fn get(&self, key: &DocKey) -> Result<Document, StoreError>;

    /// Write a document. `merge = true` performs a shallow top-level field
    /// merge; `merge = false` replaces the document wholesale.
    fn set(&self, key: &DocKey, doc: Document, merge: bool) -> Result<(), StoreError>;

    /// List feedback records with `_id`/`_uid` injected from storage keys.
    ///
    /// The remote backend returns [`StoreError::GlobalScanUnsupported`] for
    /// [`ListScope::AllUsers`] rather than an empty or partial result.
    fn list_feedback(
        &self,
        scope: &ListScope,
        limit: usize,
    ) -> Result<Vec<FeedbackRecord>, StoreError>;

    /// Most recent eval run by id ordering. Supported only on the local
    /// backend; the remote backend reports `None`.
    fn latest_eval_run(&self) -> Result<Option<EvalRun>, StoreError>;
}
