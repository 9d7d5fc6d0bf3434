//! Top-level recal configuration with 3-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Which store backend is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Remote,
    Local,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

/// Credentials and endpoint for the remote document backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Store backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Explicit backend override. When set it wins over preference order.
    pub mode: Option<BackendKind>,
    /// Path of the local single-file store.
    pub local_path: String,
    /// Remote backend settings; absent means credentials are unresolvable.
    pub remote: Option<RemoteConfig>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: None,
            local_path: "./recal_local_store.json".to_string(),
            remote: None,
        }
    }
}

/// Identifiers of the external scorer's active models.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub zsl_model: String,
    pub nli_model: String,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            zsl_model: "joeddav/xlm-roberta-large-xnli".to_string(),
            nli_model: "joeddav/xlm-roberta-large-xnli".to_string(),
        }
    }
}

/// Top-level configuration.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`RECAL_*`)
/// 2. Project config (`recal.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecalConfig {
    pub store: StoreConfig,
    pub scorer: ScorerConfig,
}

impl RecalConfig {
    /// Load configuration with 3-layer resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("recal.toml");
        if project_config_path.exists() {
            let content = std::fs::read_to_string(&project_config_path).map_err(|e| {
                ConfigError::ParseError {
                    path: project_config_path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
            config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: project_config_path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &RecalConfig) -> Result<(), ConfigError> {
        if config.store.local_path.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "store.local_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if let Some(ref remote) = config.store.remote {
            if remote.base_url.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "store.remote.base_url".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `RECAL_STORE_MODE`, `RECAL_LOCAL_STORE`, `RECAL_REMOTE_BASE_URL`, etc.
    fn apply_env_overrides(config: &mut RecalConfig) {
        if let Ok(val) = std::env::var("RECAL_STORE_MODE") {
            match val.to_ascii_lowercase().as_str() {
                "remote" => config.store.mode = Some(BackendKind::Remote),
                "local" => config.store.mode = Some(BackendKind::Local),
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("RECAL_LOCAL_STORE") {
            if !val.is_empty() {
                config.store.local_path = val;
            }
        }
        let base_url = std::env::var("RECAL_REMOTE_BASE_URL").ok();
        let api_key = std::env::var("RECAL_REMOTE_API_KEY").ok();
        if let (Some(base_url), Some(api_key)) = (base_url, api_key) {
            if !base_url.is_empty() {
                config.store.remote = Some(RemoteConfig { base_url, api_key });
            }
        }
        if let Ok(val) = std::env::var("RECAL_ZSL_MODEL") {
            if !val.is_empty() {
                config.scorer.zsl_model = val;
            }
        }
        if let Ok(val) = std::env::var("RECAL_NLI_MODEL") {
            if !val.is_empty() {
                config.scorer.nli_model = val;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_remote_and_a_local_path() {
        let config = RecalConfig::default();
        assert!(config.store.mode.is_none());
        assert!(config.store.remote.is_none());
        assert!(!config.store.local_path.is_empty());
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = RecalConfig::from_toml(
            r#"
            [store]
            mode = "local"
            local_path = "/tmp/store.json"

            [store.remote]
            base_url = "https://docs.example.com"
            api_key = "k"

            [scorer]
            zsl_model = "custom/zsl"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.mode, Some(BackendKind::Local));
        assert_eq!(config.store.local_path, "/tmp/store.json");
        assert_eq!(
            config.store.remote.as_ref().unwrap().base_url,
            "https://docs.example.com"
        );
        assert_eq!(config.scorer.zsl_model, "custom/zsl");
    }

    #[test]
    fn empty_local_path_fails_validation() {
        let mut config = RecalConfig::default();
        config.store.local_path.clear();
        assert!(RecalConfig::validate(&config).is_err());
    }

    #[test]
    fn load_reads_project_toml_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("recal.toml"),
            "[store]\nlocal_path = \"data/store.json\"\n",
        )
        .unwrap();
        let config = RecalConfig::load(dir.path()).unwrap();
        assert_eq!(config.store.local_path, "data/store.json");
    }

    #[test]
    fn load_without_a_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RecalConfig::load(dir.path()).unwrap();
        assert!(!config.store.local_path.is_empty());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = RecalConfig::from_toml("store = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
