//! JSON snapshot persistence for the record store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::engine::RecordStore;
use super::filter::RecordFilter;
use super::memory::{InMemoryRecordStore, MemoryState};
use crate::error::{StoreError, StoreResult};
use crate::model::{NewTransaction, Transaction};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    pub next_id: u64,
    pub records: Vec<Transaction>,
    pub metadata: SnapshotMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub created_at: DateTime<Utc>,
    pub record_count: usize,
}

impl StoreSnapshot {
    fn from_state(state: MemoryState) -> Self {
        let record_count = state.records.len();
        Self {
            version: SNAPSHOT_VERSION,
            next_id: state.next_id,
            records: state.records,
            metadata: SnapshotMetadata {
                created_at: Utc::now(),
                record_count,
            },
        }
    }

    fn into_state(self) -> MemoryState {
        MemoryState {
            next_id: self.next_id,
            records: self.records,
        }
    }
}

/// Record store kept in memory and mirrored to a JSON snapshot file after
/// every mutation.
pub struct FileRecordStore {
    inner: InMemoryRecordStore,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileRecordStore {
    /// Open the snapshot at `path`, starting empty when the file is absent.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let state = match fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: StoreSnapshot = serde_json::from_slice(&bytes)?;
                if snapshot.version != SNAPSHOT_VERSION {
                    return Err(StoreError::Snapshot(format!(
                        "unsupported snapshot version {} in '{}'",
                        snapshot.version,
                        path.display()
                    )));
                }
                info!(
                    path = %path.display(),
                    records = snapshot.records.len(),
                    "loaded record store snapshot"
                );
                snapshot.into_state()
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no snapshot yet, starting empty");
                MemoryState::default()
            }
            Err(err) => {
                return Err(StoreError::Io(format!(
                    "Failed to read snapshot '{}': {}",
                    path.display(),
                    err
                )));
            }
        };

        Ok(Self {
            inner: InMemoryRecordStore::from_state(state),
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self) -> StoreResult<()> {
        let snapshot = StoreSnapshot::from_state(self.inner.state().await);
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        atomic_write(&self.path, &bytes).await?;
        debug!(
            path = %self.path.display(),
            records = snapshot.metadata.record_count,
            "record store snapshot written"
        );
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn find(&self, filter: &RecordFilter) -> StoreResult<Vec<Transaction>> {
        self.inner.find(filter).await
    }

    async fn insert_many(&self, records: Vec<NewTransaction>) -> StoreResult<usize> {
        let _guard = self.write_lock.lock().await;
        let inserted = self.inner.insert_many(records).await?;
        self.flush().await?;
        Ok(inserted)
    }

    async fn delete_many(&self, filter: &RecordFilter) -> StoreResult<usize> {
        let _guard = self.write_lock.lock().await;
        let removed = self.inner.delete_many(filter).await?;
        self.flush().await?;
        Ok(removed)
    }

    async fn count(&self, filter: &RecordFilter) -> StoreResult<usize> {
        self.inner.count(filter).await
    }
}

async fn atomic_write(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await.map_err(|err| {
            StoreError::Io(format!(
                "Failed to create parent directory '{}': {}",
                parent.display(),
                err
            ))
        })?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).await.map_err(|err| {
        StoreError::Io(format!(
            "Failed to write temp file '{}': {}",
            tmp.display(),
            err
        ))
    })?;

    fs::rename(&tmp, path).await.map_err(|err| {
        StoreError::Io(format!(
            "Failed to rename temp file '{}' -> '{}': {}",
            tmp.display(),
            path.display(),
            err
        ))
    })?;
    Ok(())
}
