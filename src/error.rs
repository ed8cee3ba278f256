use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("binary `{binary}` missing from PATH")]
    BinaryMissing { binary: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("audio decode failed: {0}")]
    Audio(String),

    #[error("model unavailable: {0}")]
    Model(String),

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

pub type AppResult<T> = Result<T, AppError>;
