use thiserror::Error;

use crate::mapper::StructuralError;
use crate::status::RpcStatus;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed upstream payload: {0}")]
    Structural(#[from] StructuralError),

    #[error("Upstream call aborted: {0}")]
    Rpc(#[from] RpcStatus),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
