use std::sync::Arc;

use tracing::{info, instrument};

use crate::app::ingest_use_case::RiotIngestUseCase;
use crate::app::ports::MatchStorePort;
use crate::common::error::Result;
use crate::domain::MatchRecord;
use crate::observability::metrics;

/// Fetches matches and hands them to a store keyed by match id
pub struct MatchArchive {
    ingest: Arc<RiotIngestUseCase>,
    store: Arc<dyn MatchStorePort>,
}

impl MatchArchive {
    pub fn new(ingest: Arc<RiotIngestUseCase>, store: Arc<dyn MatchStorePort>) -> Self {
        Self { ingest, store }
    }

    /// Fetch, map and store one match. Always fetches; an existing record is replaced.
    #[instrument(skip(self))]
    pub async fn archive(&self, match_id: &str) -> Result<MatchRecord> {
        let record = self.ingest.get_match_data(match_id).await?;
        self.store.store(&record).await?;
        metrics::archive::record_stored();
        info!("Archived match {}", record.match_id());
        Ok(record)
    }

    pub async fn find(&self, match_id: &str) -> Result<Option<MatchRecord>> {
        self.store.find(match_id).await
    }

    pub async fn delete(&self, match_id: &str) -> Result<bool> {
        let removed = self.store.delete(match_id).await?;
        if removed {
            metrics::archive::record_deleted();
        }
        Ok(removed)
    }
}
