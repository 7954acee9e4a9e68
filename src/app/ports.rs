use async_trait::async_trait;
use thiserror::Error;

use crate::common::error::Result;
use crate::domain::MatchRecord;

// Ingest-side ports
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> std::result::Result<HttpGetResult, HttpFailure>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Why a GET produced no usable response
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum HttpFailure {
    /// No status line was received (connect error, timeout)
    #[error("{0}")]
    Transport(String),

    /// The status line arrived but reading the body failed
    #[error("reading body after HTTP {status} failed: {error}")]
    Body { status: u16, error: String },
}

// Persistence port, keyed by match id
#[async_trait]
pub trait MatchStorePort: Send + Sync {
    async fn store(&self, record: &MatchRecord) -> Result<()>;
    async fn find(&self, match_id: &str) -> Result<Option<MatchRecord>>;
    /// Returns whether a record was removed
    async fn delete(&self, match_id: &str) -> Result<bool>;
}
