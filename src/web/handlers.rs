use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use super::error::{ApiError, ApiResult, Operation};
use crate::combined::CombinedView;
use crate::model::Transaction;
use crate::query::{
    BarChart, DEFAULT_PAGE, DEFAULT_PER_PAGE, PieChart, SearchPage, SearchRequest, Statistics,
};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    pub month: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub month: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    #[serde(rename = "perPage")]
    pub per_page: Option<u32>,
}

impl From<SearchParams> for SearchRequest {
    fn from(params: SearchParams) -> Self {
        Self {
            month: params.month,
            search: params.search,
            page: params.page.unwrap_or(DEFAULT_PAGE),
            per_page: params.per_page.unwrap_or(DEFAULT_PER_PAGE),
        }
    }
}

pub async fn healthcheck() -> &'static str {
    "ok"
}

pub async fn initialize(State(state): State<AppState>) -> ApiResult<&'static str> {
    state
        .loader
        .reload()
        .await
        .map_err(|e| ApiError::new(Operation::Initialize, e))?;

    Ok("Database initialized successfully")
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let records = state
        .queries
        .list(params.month.as_deref())
        .await
        .map_err(|e| ApiError::new(Operation::List, e))?;

    Ok(Json(records))
}

pub async fn search_transactions(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchPage>> {
    let page = state
        .queries
        .search(&SearchRequest::from(params))
        .await
        .map_err(|e| ApiError::new(Operation::Search, e))?;

    Ok(Json(page))
}

pub async fn statistics(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Json<Statistics>> {
    let stats = state
        .queries
        .statistics(params.month.as_deref())
        .await
        .map_err(|e| ApiError::new(Operation::Statistics, e))?;

    Ok(Json(stats))
}

pub async fn bar_chart(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Json<BarChart>> {
    let chart = state
        .queries
        .bar_chart(params.month.as_deref())
        .await
        .map_err(|e| ApiError::new(Operation::BarChart, e))?;

    Ok(Json(chart))
}

pub async fn pie_chart(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Json<PieChart>> {
    let chart = state
        .queries
        .pie_chart(params.month.as_deref())
        .await
        .map_err(|e| ApiError::new(Operation::PieChart, e))?;

    Ok(Json(chart))
}

pub async fn combined(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Json<CombinedView>> {
    let view = state
        .queries
        .combined(params.month.as_deref())
        .await
        .map_err(|e| ApiError::new(Operation::Combined, e))?;

    Ok(Json(view))
}
