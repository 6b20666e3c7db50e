// File: src/error.rs
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("preference file I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("could not replace preference file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, thiserror::Error)]
pub enum ImeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
