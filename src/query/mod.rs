//! Month-scoped read operations over the record store.
//!
//! Every operation scans the candidate set from the store, keeps the records
//! whose `dateOfSale` falls in the requested month and reduces them. Only the
//! optional text filter of `search` is handed to the store.

pub mod charts;
pub mod search;
pub mod stats;

use std::sync::Arc;

use tracing::debug;

pub use charts::{BUCKET_LABELS, BarChart, PieChart, bucket_index};
pub use search::{DEFAULT_PAGE, DEFAULT_PER_PAGE, SearchPage, SearchRequest, paginate};
pub use stats::Statistics;

use crate::error::{ServiceError, ServiceResult};
use crate::model::Transaction;
use crate::month::{filter_by_month, parse_month_name};
use crate::storage::{RecordFilter, RecordStore};

/// Rejects an absent or empty month.
pub fn require_month(month: Option<&str>) -> ServiceResult<&str> {
    month
        .filter(|month| !month.is_empty())
        .ok_or(ServiceError::MissingParameter("Month"))
}

#[derive(Clone)]
pub struct TransactionQueries {
    store: Arc<dyn RecordStore>,
}

impl TransactionQueries {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    async fn month_records(
        &self,
        month: &str,
        filter: &RecordFilter,
    ) -> ServiceResult<Vec<Transaction>> {
        let records = self
            .store
            .find(filter)
            .await
            .map_err(ServiceError::StoreReadFailure)?;

        if parse_month_name(month).is_none() {
            debug!(month, "not an English month name, nothing will match");
        }

        Ok(filter_by_month(records, month))
    }

    /// Records sold in `month`, in insertion order.
    pub async fn list(&self, month: Option<&str>) -> ServiceResult<Vec<Transaction>> {
        let month = require_month(month)?;
        self.month_records(month, &RecordFilter::All).await
    }

    pub async fn search(&self, request: &SearchRequest) -> ServiceResult<SearchPage> {
        let month = require_month(request.month.as_deref())?;

        let filter = match request.search_text() {
            Some(text) => RecordFilter::text(text),
            None => RecordFilter::All,
        };

        let matched = self.month_records(month, &filter).await?;
        let total = matched.len();
        let products = paginate(matched, request.page, request.per_page);

        debug!(
            month,
            search = request.search_text().unwrap_or_default(),
            page = request.page,
            per_page = request.per_page,
            total,
            returned = products.len(),
            "search served"
        );

        Ok(SearchPage {
            page: request.page,
            per_page: request.per_page,
            total,
            products,
        })
    }

    pub async fn statistics(&self, month: Option<&str>) -> ServiceResult<Statistics> {
        let records = self.list(month).await?;
        Ok(Statistics::from_records(&records))
    }

    pub async fn bar_chart(&self, month: Option<&str>) -> ServiceResult<BarChart> {
        let records = self.list(month).await?;
        Ok(BarChart::from_records(&records))
    }

    pub async fn pie_chart(&self, month: Option<&str>) -> ServiceResult<PieChart> {
        let records = self.list(month).await?;
        Ok(PieChart::from_records(&records))
    }
}
