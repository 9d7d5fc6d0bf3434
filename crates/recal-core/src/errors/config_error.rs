//! Configuration errors.

/// Errors raised while resolving or validating configuration and requests.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    #[error("uid is required for user scope")]
    UidRequired,

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}
