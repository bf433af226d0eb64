// ============================================================================
// Salesboard Library
// ============================================================================

pub mod combined;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod month;
pub mod query;
pub mod state;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use combined::CombinedView;
pub use config::AppConfig;
pub use error::{ServiceError, ServiceResult, StoreError, StoreResult};
pub use ingest::{HttpTransactionSource, IngestionLoader, StaticTransactionSource, TransactionSource};
pub use model::{NewTransaction, Transaction};
pub use query::{BarChart, PieChart, SearchPage, SearchRequest, Statistics, TransactionQueries};
pub use state::AppState;
pub use storage::{FileRecordStore, InMemoryRecordStore, RecordFilter, RecordStore, open_store};
pub use web::build_router;
