//! HTTP response mapping
//!
//! Maps each `AppError` variant to its HTTP status code and renders the
//! uniform `{"error": "<message>"}` body. The upstream-status variant
//! mirrors the upstream's own status code back to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::MissingParameters => StatusCode::BAD_REQUEST,
        AppError::InvalidKey => StatusCode::FORBIDDEN,
        AppError::SourceNotFound { .. } | AppError::NoItems { .. } => StatusCode::NOT_FOUND,
        AppError::UpstreamStatus { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        AppError::UpstreamRequest { .. }
        | AppError::FeedParse { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
