use async_trait::async_trait;
use tokio::sync::RwLock;

use super::engine::RecordStore;
use super::filter::RecordFilter;
use crate::error::StoreResult;
use crate::model::{NewTransaction, Transaction};

#[derive(Debug, Clone)]
pub(crate) struct MemoryState {
    pub(crate) next_id: u64,
    pub(crate) records: Vec<Transaction>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

/// Vec-backed record store. Records stay in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    state: RwLock<MemoryState>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_state(state: MemoryState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub(crate) async fn state(&self) -> MemoryState {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find(&self, filter: &RecordFilter) -> StoreResult<Vec<Transaction>> {
        let state = self.state.read().await;
        Ok(state
            .records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn insert_many(&self, records: Vec<NewTransaction>) -> StoreResult<usize> {
        let mut state = self.state.write().await;
        let inserted = records.len();
        state.records.reserve(inserted);

        for record in records {
            let id = state.next_id;
            state.next_id += 1;
            state.records.push(record.into_transaction(id));
        }

        Ok(inserted)
    }

    async fn delete_many(&self, filter: &RecordFilter) -> StoreResult<usize> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|record| !filter.matches(record));
        let removed = before - state.records.len();

        // Ids restart after a full clear so a reload numbers records 1..=n.
        if state.records.is_empty() {
            state.next_id = 1;
        }

        Ok(removed)
    }

    async fn count(&self, filter: &RecordFilter) -> StoreResult<usize> {
        let state = self.state.read().await;
        Ok(state.records.iter().filter(|record| filter.matches(record)).count())
    }
}
