use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use super::NEWSPROBE_STATUS_HEADER;
use super::error::GatewayError;
use super::state::HandlerState;
use crate::scoring::AnalyzeRequest;

/// Classifies the posted text and attaches the nearest indexed articles.
///
/// Scoring is CPU-bound, so it runs on the blocking pool.
#[instrument(skip(state, payload), fields(text_len = tracing::field::Empty))]
pub async fn analyze_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let Json(request) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    tracing::Span::current().record("text_len", request.text.len());

    let context = state.context.clone();
    let result = tokio::task::spawn_blocking(move || context.pipeline().analyze(&request))
        .await
        .map_err(|e| GatewayError::InternalError(format!("analysis task failed: {e}")))??;

    debug!(
        label = result.classification.label,
        evidence = result.evidence().len(),
        "Analyze request served"
    );

    let mut headers = HeaderMap::new();
    let status = if result.classification.is_fake() {
        "fake"
    } else {
        "real"
    };
    headers.insert(NEWSPROBE_STATUS_HEADER, HeaderValue::from_static(status));

    Ok((StatusCode::OK, headers, Json(result)).into_response())
}
