pub mod engine;
pub mod filter;
pub mod memory;
pub mod persistence;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

pub use engine::RecordStore;
pub use filter::{RecordFilter, TextMatch};
pub use memory::InMemoryRecordStore;
pub use persistence::FileRecordStore;

use crate::error::{StoreError, StoreResult};

/// Open the record store named by a connection string.
///
/// Supported forms: `memory://` and `file://<path>`.
pub async fn open_store(url: &str) -> StoreResult<Arc<dyn RecordStore>> {
    let url = url.trim();

    if url == "memory://" || url == "memory" {
        return Ok(Arc::new(InMemoryRecordStore::new()));
    }

    if let Some(path) = url.strip_prefix("file://") {
        if path.is_empty() {
            return Err(StoreError::UnsupportedUrl(
                "file:// url needs a snapshot path".to_string(),
            ));
        }
        let store = FileRecordStore::open(PathBuf::from(path)).await?;
        info!(path = %store.path().display(), "opened file-backed record store");
        return Ok(Arc::new(store));
    }

    Err(StoreError::UnsupportedUrl(format!(
        "'{url}' (expected memory:// or file://<path>)"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_url_opens_empty_store() {
        let store = open_store("memory://").await.unwrap();
        assert_eq!(store.count(&RecordFilter::All).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_scheme_is_rejected() {
        let err = open_store("mongodb://localhost:27017/products").await.err().unwrap();
        assert!(matches!(err, StoreError::UnsupportedUrl(_)));

        let err = open_store("file://").await.err().unwrap();
        assert!(matches!(err, StoreError::UnsupportedUrl(_)));
    }

    #[tokio::test]
    async fn file_url_opens_snapshot_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let url = format!("file://{}", dir.path().join("store.json").display());
        let store = open_store(&url).await.unwrap();
        assert_eq!(store.count(&RecordFilter::All).await.unwrap(), 0);
    }
}
