use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::error::ServiceError;

/// The endpoint a failure happened in. Selects the prefix of the 500 body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Initialize,
    List,
    Search,
    Statistics,
    BarChart,
    PieChart,
    Combined,
}

impl Operation {
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Self::Initialize => "Error initializing database",
            Self::List => "Error fetching transactions",
            Self::Search => "Error searching transactions",
            Self::Statistics => "Error fetching statistics",
            Self::BarChart => "Error fetching bar chart data",
            Self::PieChart => "Error fetching pie chart data",
            Self::Combined => "Error fetching combined data",
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub operation: Operation,
    pub error: ServiceError,
}

impl ApiError {
    pub fn new(operation: Operation, error: ServiceError) -> Self {
        Self { operation, error }
    }

    pub fn status(&self) -> StatusCode {
        if self.error.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn message(&self) -> String {
        if self.error.is_client_error() {
            self.error.to_string()
        } else {
            format!("{}: {}", self.operation.failure_prefix(), self.error)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!(operation = ?self.operation, error = %self.error, "request failed");
        } else {
            warn!(operation = ?self.operation, error = %self.error, "rejected request");
        }

        (status, message).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn missing_month_is_a_bad_request() {
        let err = ApiError::new(Operation::BarChart, ServiceError::MissingParameter("Month"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Month is required");
    }

    #[test]
    fn server_failures_are_prefixed_with_the_operation() {
        let err = ApiError::new(
            Operation::Initialize,
            ServiceError::source_unavailable("Request failed with status code 403"),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.message(),
            "Error initializing database: Request failed with status code 403"
        );

        let err = ApiError::new(
            Operation::Statistics,
            ServiceError::StoreReadFailure(StoreError::Unavailable("timed out".into())),
        );
        assert_eq!(
            err.message(),
            "Error fetching statistics: Store unavailable: timed out"
        );
    }
}
