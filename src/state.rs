use std::sync::Arc;

use crate::ingest::{IngestionLoader, TransactionSource};
use crate::query::TransactionQueries;
use crate::storage::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub queries: TransactionQueries,
    pub loader: Arc<IngestionLoader>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, source: Arc<dyn TransactionSource>) -> Self {
        Self {
            queries: TransactionQueries::new(store.clone()),
            loader: Arc::new(IngestionLoader::new(store, source)),
        }
    }
}
