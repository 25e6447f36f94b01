use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use compareason_core::{OrderedMap, SiteStatus};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct StatusData {
    status: &'static str,
    sites: OrderedMap<SiteStatus>,
    timestamp: DateTime<Utc>,
}

pub(super) async fn site_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<StatusData>> {
    let sites = state.comparator.probe().await;
    let online = sites.values().filter(|s| s.is_online()).count();
    tracing::info!(online, total = sites.len(), "site status probed");

    Json(ApiResponse {
        data: StatusData {
            status: "success",
            sites,
            timestamp: Utc::now(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
