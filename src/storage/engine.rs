use async_trait::async_trait;

use super::filter::RecordFilter;
use crate::error::StoreResult;
use crate::model::{NewTransaction, Transaction};

/// Record store backend - allows pluggable storage for transaction records
///
/// Implementations return records in insertion order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record matching the filter
    async fn find(&self, filter: &RecordFilter) -> StoreResult<Vec<Transaction>>;

    /// Append records, assigning ids. Returns the number inserted.
    async fn insert_many(&self, records: Vec<NewTransaction>) -> StoreResult<usize>;

    /// Remove every record matching the filter. Returns the number removed.
    async fn delete_many(&self, filter: &RecordFilter) -> StoreResult<usize>;

    /// Count records matching the filter
    async fn count(&self, filter: &RecordFilter) -> StoreResult<usize>;
}
