use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use salesboard::{
    FileRecordStore, HttpTransactionSource, IngestionLoader, RecordFilter, RecordStore,
    ServiceError, TransactionQueries, TransactionSource,
};
use tempfile::TempDir;

const FIXTURE: &str = include_str!("fixtures/product_transactions.json");

async fn spawn_source_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/product_transaction.json",
            get(|| async { ([("content-type", "application/json")], FIXTURE) }),
        )
        .route(
            "/forbidden.json",
            get(|| async { (StatusCode::FORBIDDEN, "AccessDenied") }),
        )
        .route("/truncated.json", get(|| async { &FIXTURE[..200] }))
        .route(
            "/negative.json",
            get(|| async {
                r#"[{"title":"refund","price":-3,"description":"","category":"misc","sold":true,"dateOfSale":"2022-03-05"}]"#
            }),
        )
        .route(
            "/slow.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "[]"
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("source server");
    });
    addr
}

fn source(addr: SocketAddr, path: &str) -> HttpTransactionSource {
    HttpTransactionSource::new(format!("http://{addr}{path}"), Duration::from_secs(2))
        .expect("client should build")
}

#[tokio::test]
async fn http_source_parses_the_dataset() {
    let addr = spawn_source_server().await;
    let records = source(addr, "/product_transaction.json")
        .fetch()
        .await
        .expect("fetch should succeed");

    assert_eq!(records.len(), 10);
    assert_eq!(records[6].price, 100.0);
    assert_eq!(records[4].category, "jewelery");
}

#[tokio::test]
async fn http_source_failures_are_source_unavailable() {
    let addr = spawn_source_server().await;

    let err = source(addr, "/forbidden.json").fetch().await.unwrap_err();
    assert!(matches!(err, ServiceError::SourceUnavailable(_)));
    assert_eq!(err.to_string(), "Request failed with status code 403");

    let err = source(addr, "/truncated.json").fetch().await.unwrap_err();
    assert!(matches!(err, ServiceError::SourceUnavailable(_)));
    assert!(err.to_string().starts_with("malformed transaction payload"));

    let err = source(addr, "/slow.json").fetch().await.unwrap_err();
    assert!(matches!(err, ServiceError::SourceUnavailable(_)));

    let err = source(addr, "/missing.json").fetch().await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status code 404");
}

#[tokio::test]
async fn load_job_populates_a_file_store_for_later_serving() {
    let addr = spawn_source_server().await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    {
        let store: Arc<dyn RecordStore> = Arc::new(FileRecordStore::open(&path).await.unwrap());
        let loader = IngestionLoader::new(store, Arc::new(source(addr, "/product_transaction.json")));
        assert_eq!(loader.reload().await.unwrap(), 10);
    }

    let store: Arc<dyn RecordStore> = Arc::new(FileRecordStore::open(&path).await.unwrap());
    let queries = TransactionQueries::new(store.clone());
    let november = queries.list(Some("November")).await.unwrap();
    assert_eq!(november.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 5, 6, 7]);

    // A bad payload never reaches the store.
    let loader = IngestionLoader::new(store.clone(), Arc::new(source(addr, "/negative.json")));
    let err = loader.reload().await.unwrap_err();
    assert!(matches!(err, ServiceError::SourceUnavailable(_)));
    assert_eq!(store.count(&RecordFilter::All).await.unwrap(), 10);
}
