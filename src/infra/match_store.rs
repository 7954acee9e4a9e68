use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::app::ports::MatchStorePort;
use crate::common::error::{IngestError, Result};
use crate::domain::MatchRecord;

/// In-memory match store for development/testing
#[derive(Clone, Default)]
pub struct InMemoryMatchStore {
    matches: Arc<Mutex<HashMap<String, MatchRecord>>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, MatchRecord>>> {
        self.matches
            .lock()
            .map_err(|e| IngestError::Storage(format!("match store lock poisoned: {}", e)))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MatchStorePort for InMemoryMatchStore {
    async fn store(&self, record: &MatchRecord) -> Result<()> {
        let mut matches = self.lock()?;
        matches.insert(record.match_id().to_string(), record.clone());
        debug!("Stored match {}", record.match_id());
        Ok(())
    }

    async fn find(&self, match_id: &str) -> Result<Option<MatchRecord>> {
        Ok(self.lock()?.get(match_id).cloned())
    }

    async fn delete(&self, match_id: &str) -> Result<bool> {
        let removed = self.lock()?.remove(match_id).is_some();
        debug!("Delete match {} removed={}", match_id, removed);
        Ok(removed)
    }
}
