use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading and validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing section [{0}]")]
    MissingSection(String),
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),
}

impl ConfigError {
    pub(crate) fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("column type not expected: {0}")]
    UnexpectedColumnType(String),
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
