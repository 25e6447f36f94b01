mod compare;
mod search;
mod status;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use compareason_compare::Comparator;
use compareason_core::AppConfig;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub comparator: Comparator,
    pub limits: ResultLimits,
}

/// Result-count defaults and the hard cap applied to caller-supplied limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimits {
    pub default_max_results: usize,
    pub default_max_results_per_source: usize,
    pub cap: usize,
}

impl ResultLimits {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_max_results: config.default_max_results,
            default_max_results_per_source: config.default_max_results_per_source,
            cap: config.max_results_cap,
        }
    }

    /// `requested` (or `default`) clamped to `1..=cap`.
    pub(super) fn clamp(self, requested: Option<usize>, default: usize) -> usize {
        requested.unwrap_or(default).clamp(1, self.cap.max(1))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "scrape_failed" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Trimmed query text, or a `validation_error` when blank.
pub(super) fn require_query(request_id: &str, query: &str) -> Result<String, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            "query must not be blank",
        ));
    }
    Ok(query.to_owned())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/v1/health", get(health))
        .route("/api/v1/search", post(search::search_post))
        .route("/api/v1/search/{query}", get(search::search_get))
        .route("/api/v1/compare", post(compare::compare_post))
        .route("/api/v1/compare/{query}", get(compare::compare_get))
        .route("/api/v1/status", get(status::site_status))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    supported_sources: Vec<String>,
    endpoints: Vec<&'static str>,
}

const ENDPOINTS: &[&str] = &[
    "GET /api/v1/health",
    "POST /api/v1/search",
    "GET /api/v1/search/{query}",
    "POST /api/v1/compare",
    "GET /api/v1/compare/{query}",
    "GET /api/v1/status",
];

async fn root(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ServiceInfo>> {
    Json(ApiResponse {
        data: ServiceInfo {
            name: "compareason",
            version: env!("CARGO_PKG_VERSION"),
            supported_sources: state
                .comparator
                .registry()
                .ids()
                .map(str::to_owned)
                .collect(),
            endpoints: ENDPOINTS.to_vec(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

async fn health(Extension(req_id): Extension<RequestId>) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
