//! Error types for the configuration accessor crate.

use thiserror::Error;

/// Errors from reading typed configuration values.
#[derive(Debug, Error)]
pub enum ConfError {
    /// Loading or storing the backing properties file failed.
    #[error(transparent)]
    Props(#[from] jcs_props::PropsError),

    /// A value is present but cannot be read as the expected type.
    #[error("invalid value for {key}: {value:?}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Convenience alias for configuration results.
pub type ConfResult<T> = std::result::Result<T, ConfError>;
