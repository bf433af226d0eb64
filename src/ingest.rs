//! Full-replace ingestion of the transaction dataset.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::model::NewTransaction;
use crate::storage::{RecordFilter, RecordStore};

pub const DEFAULT_SOURCE_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the dataset comes from.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch(&self) -> ServiceResult<Vec<NewTransaction>>;

    fn describe(&self) -> String;
}

/// Fetches a JSON array of transactions over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransactionSource {
    client: reqwest::Client,
    url: String,
}

impl HttpTransactionSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::source_unavailable(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
    async fn fetch(&self) -> ServiceResult<Vec<NewTransaction>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ServiceError::source_unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::source_unavailable(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::source_unavailable(e.to_string()))?;

        serde_json::from_slice::<Vec<NewTransaction>>(&body).map_err(|e| {
            ServiceError::source_unavailable(format!("malformed transaction payload: {e}"))
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Serves a fixed set of records. Used for seeding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTransactionSource {
    records: Vec<NewTransaction>,
}

impl StaticTransactionSource {
    pub fn new(records: Vec<NewTransaction>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl TransactionSource for StaticTransactionSource {
    async fn fetch(&self) -> ServiceResult<Vec<NewTransaction>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }
}

/// Replaces the store contents with whatever the source delivers.
pub struct IngestionLoader {
    store: Arc<dyn RecordStore>,
    source: Arc<dyn TransactionSource>,
    reload_lock: Mutex<()>,
}

impl IngestionLoader {
    pub fn new(store: Arc<dyn RecordStore>, source: Arc<dyn TransactionSource>) -> Self {
        Self {
            store,
            source,
            reload_lock: Mutex::new(()),
        }
    }

    /// Fetch, validate, clear, insert. Returns the number of records stored.
    ///
    /// The store is only touched once the whole payload has been fetched and
    /// validated. A failure during the write phase may leave it cleared.
    pub async fn reload(&self) -> ServiceResult<usize> {
        let _guard = self.reload_lock.lock().await;
        let source = self.source.describe();

        let records = self.source.fetch().await.inspect_err(|err| {
            warn!(source = %source, error = %err, "transaction source unavailable");
        })?;

        for record in &records {
            record.validate().map_err(|reason| {
                ServiceError::source_unavailable(format!("malformed transaction payload: {reason}"))
            })?;
        }

        let removed = self
            .store
            .delete_many(&RecordFilter::All)
            .await
            .map_err(ServiceError::StoreWriteFailure)?;

        let inserted = self
            .store
            .insert_many(records)
            .await
            .map_err(ServiceError::StoreWriteFailure)?;

        info!(source = %source, removed, inserted, "transaction dataset reloaded");
        Ok(inserted)
    }
}
