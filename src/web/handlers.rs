use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct RssQuery {
    pub source: Option<String>,
    pub key: Option<String>,
}

/// `GET /rss?source=<name>&key=<secret>` — the filtered feed endpoint.
///
/// Success is the serialized XML document; every failure is a JSON
/// `{"error": ...}` body with the status mapped in [`super::responses`].
pub async fn filtered_feed(
    State(state): State<AppState>,
    Query(params): Query<RssQuery>,
) -> Result<Response, AppError> {
    let xml = state
        .service
        .handle(params.source.as_deref(), params.key.as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    )
        .into_response())
}

/// Liveness check.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
