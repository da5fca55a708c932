//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid manifest: {0}")]
    Schema(String),

    #[error("unsupported metadata version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid manifest shape: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
