use serde::Serialize;

use crate::error::ServiceResult;
use crate::model::Transaction;
use crate::query::{BarChart, PieChart, TransactionQueries, require_month};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedView {
    pub transactions: Vec<Transaction>,
    pub bar_chart: BarChart,
    pub pie_chart: PieChart,
}

impl TransactionQueries {
    /// List, bar chart and pie chart for one month, fetched concurrently.
    /// The first failing part fails the whole view.
    pub async fn combined(&self, month: Option<&str>) -> ServiceResult<CombinedView> {
        let month = Some(require_month(month)?);

        let (transactions, bar_chart, pie_chart) = futures::try_join!(
            self.list(month),
            self.bar_chart(month),
            self.pie_chart(month)
        )?;

        Ok(CombinedView {
            transactions,
            bar_chart,
            pie_chart,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{ServiceError, StoreError, StoreResult};
    use crate::model::{NewTransaction, sale_date};
    use crate::storage::{InMemoryRecordStore, RecordFilter, RecordStore};

    struct BrokenStore;

    #[async_trait]
    impl RecordStore for BrokenStore {
        async fn find(&self, _filter: &RecordFilter) -> StoreResult<Vec<Transaction>> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn insert_many(&self, _records: Vec<NewTransaction>) -> StoreResult<usize> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn delete_many(&self, _filter: &RecordFilter) -> StoreResult<usize> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn count(&self, _filter: &RecordFilter) -> StoreResult<usize> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn combined_matches_the_individual_operations() {
        let store = Arc::new(InMemoryRecordStore::new());
        store
            .insert_many(vec![NewTransaction {
                title: "Phone".to_string(),
                price: 150.0,
                description: String::new(),
                category: "Electronics".to_string(),
                image: None,
                sold: true,
                date_of_sale: sale_date::parse("2022-03-05").unwrap(),
            }])
            .await
            .unwrap();
        let queries = TransactionQueries::new(store);

        let view = queries.combined(Some("March")).await.unwrap();
        assert_eq!(view.transactions, queries.list(Some("March")).await.unwrap());
        assert_eq!(view.bar_chart, queries.bar_chart(Some("March")).await.unwrap());
        assert_eq!(view.pie_chart, queries.pie_chart(Some("March")).await.unwrap());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["barChart"]["101-200"], 1);
        assert_eq!(json["pieChart"]["Electronics"], 1);
        assert_eq!(json["transactions"][0]["title"], "Phone");
    }

    #[tokio::test]
    async fn combined_fails_as_a_whole() {
        let queries = TransactionQueries::new(Arc::new(BrokenStore));
        let err = queries.combined(Some("March")).await.unwrap_err();
        assert!(matches!(err, ServiceError::StoreReadFailure(_)));

        let err = queries.combined(None).await.unwrap_err();
        assert!(err.is_client_error());
    }
}
