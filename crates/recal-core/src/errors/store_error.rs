//! Persistence errors shared by both store backends.

/// Errors raised by the feedback store.
///
/// `GlobalScanUnsupported` is a capability signal, not a fault: the remote
/// backend can only list feedback scoped to a single uid, and callers asking
/// for an all-users scan must see that limit rather than partial data.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Global feedback scan is not supported by the remote backend")]
    GlobalScanUnsupported,

    #[error("Store I/O failed at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Store file corrupt at {path}: {message}")]
    Corrupt { path: String, message: String },

    #[error("Remote store call failed (status {status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Document serialization failed: {message}")]
    Serialize { message: String },
}
