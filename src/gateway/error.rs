use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::NEWSPROBE_STATUS_HEADER;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("analysis failed: {0}")]
    ScoringFailed(#[from] ScoringError),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::ScoringFailed(e) if e.is_empty_input() => {
                (StatusCode::BAD_REQUEST, e.code())
            }
            GatewayError::ScoringFailed(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.code()),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, newsprobe_status) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = newsprobe_status, "Request failed");
        } else {
            tracing::debug!(error = %self, code = newsprobe_status, "Request rejected");
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            NEWSPROBE_STATUS_HEADER,
            HeaderValue::from_static(newsprobe_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
