use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use compareason_core::ComparisonResult;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{require_query, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CompareRequest {
    pub query: String,
    pub max_results_per_source: Option<usize>,
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CompareParams {
    pub max_results_per_source: Option<usize>,
    /// Comma-separated source ids.
    pub sources: Option<String>,
}

/// Splits a comma-separated source list. A blank list means "all sources".
pub(super) fn parse_source_list(raw: Option<&str>) -> Option<Vec<String>> {
    let sources: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    (!sources.is_empty()).then_some(sources)
}

async fn run_compare(
    state: &AppState,
    request_id: String,
    query: &str,
    max_results_per_source: Option<usize>,
    sources: Option<Vec<String>>,
) -> Result<Json<ApiResponse<ComparisonResult>>, ApiError> {
    let query = require_query(&request_id, query)?;
    let per_source = state.limits.clamp(
        max_results_per_source,
        state.limits.default_max_results_per_source,
    );

    let result = state
        .comparator
        .compare(&query, per_source, sources.as_deref())
        .await;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(request_id),
    }))
}

pub(super) async fn compare_post(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CompareRequest>,
) -> Result<Json<ApiResponse<ComparisonResult>>, ApiError> {
    run_compare(
        &state,
        req_id.0,
        &body.query,
        body.max_results_per_source,
        body.sources,
    )
    .await
}

pub(super) async fn compare_get(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(query): Path<String>,
    Query(params): Query<CompareParams>,
) -> Result<Json<ApiResponse<ComparisonResult>>, ApiError> {
    let sources = parse_source_list(params.sources.as_deref());
    run_compare(
        &state,
        req_id.0,
        &query,
        params.max_results_per_source,
        sources,
    )
    .await
}
