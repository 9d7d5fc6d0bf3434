//! Runtime configuration with layered resolution.

pub mod recal_config;

pub use recal_config::{BackendKind, RecalConfig, RemoteConfig, ScorerConfig, StoreConfig};
