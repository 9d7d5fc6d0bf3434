//! Construction-time backend selection.
//!
//! Deterministic policy: an explicit mode override wins; otherwise the remote
//! backend is preferred whenever credentials resolve. A remote construction
//! failure demotes to the local backend with a warning instead of raising —
//! the only fatal selection outcome is an unusable local store file.

use std::path::Path;

use tracing::{debug, info, warn};

use recal_core::config::{BackendKind, StoreConfig};
use recal_core::errors::StoreError;

use crate::{FeedbackStore, LocalStore, RemoteStore};

/// Select and construct the store backend for this process.
pub fn select_backend(config: &StoreConfig) -> Result<Box<dyn FeedbackStore>, StoreError> {
    let wants_remote = match config.mode {
        Some(BackendKind::Local) => false,
        Some(BackendKind::Remote) => true,
        None => config.remote.is_some(),
    };

    if wants_remote {
        match &config.remote {
            Some(remote) => match RemoteStore::connect(remote) {
                Ok(store) => {
                    info!(backend = "remote", base_url = %remote.base_url, "store backend selected");
                    return Ok(Box::new(store));
                }
                Err(e) => {
                    warn!(error = %e, "remote store construction failed, demoting to local backend");
                }
            },
            None => {
                warn!("remote backend requested but no credentials resolved, demoting to local backend");
            }
        }
    } else if config.mode.is_none() {
        debug!("no remote credentials resolved, using local backend");
    }

    let store = LocalStore::open(Path::new(&config.local_path))?;
    info!(backend = "local", path = %config.local_path, "store backend selected");
    Ok(Box::new(store))
}
