use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use compareason_compare::{
    truncate_message, CompareError, DEFAULT_SEARCH_SOURCE, ERROR_MESSAGE_LIMIT,
};
use compareason_core::Product;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{require_query, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    pub query: String,
    pub max_results: Option<usize>,
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    pub max_results: Option<usize>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchData {
    products: Vec<Product>,
    total_found: usize,
    query: String,
    source: String,
}

pub(super) fn map_compare_error(request_id: String, error: &CompareError) -> ApiError {
    match error {
        CompareError::UnknownSource(_) => ApiError::new(request_id, "not_found", error.to_string()),
        CompareError::Scraper(e) => {
            tracing::warn!(error = %e, "single-source search failed");
            ApiError::new(
                request_id,
                "scrape_failed",
                truncate_message(&e.to_string(), ERROR_MESSAGE_LIMIT),
            )
        }
        CompareError::DuplicateSource(_) | CompareError::DuplicateDisplayName(_) => {
            tracing::error!(error = %error, "unexpected registry error during search");
            ApiError::new(request_id, "internal_error", "search failed")
        }
    }
}

async fn run_search(
    state: &AppState,
    request_id: String,
    query: &str,
    max_results: Option<usize>,
    source: Option<String>,
) -> Result<Json<ApiResponse<SearchData>>, ApiError> {
    let query = require_query(&request_id, query)?;
    let max_results = state
        .limits
        .clamp(max_results, state.limits.default_max_results);
    let source = source
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SEARCH_SOURCE.to_owned());

    let products = state
        .comparator
        .search(&source, &query, max_results)
        .await
        .map_err(|e| map_compare_error(request_id.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: SearchData {
            total_found: products.len(),
            products,
            query,
            source,
        },
        meta: ResponseMeta::new(request_id),
    }))
}

pub(super) async fn search_post(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchData>>, ApiError> {
    run_search(&state, req_id.0, &body.query, body.max_results, body.source).await
}

pub(super) async fn search_get(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(query): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchData>>, ApiError> {
    run_search(&state, req_id.0, &query, params.max_results, params.source).await
}
