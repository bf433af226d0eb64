use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Unsupported store url: {0}")]
    UnsupportedUrl(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}

/// Failures surfaced by the loader and the query operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0} is required")]
    MissingParameter(&'static str),

    #[error("{0}")]
    SourceUnavailable(String),

    #[error("{0}")]
    StoreWriteFailure(StoreError),

    #[error("{0}")]
    StoreReadFailure(StoreError),
}

impl ServiceError {
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable(message.into())
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingParameter(_))
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
