//! HTTP gateway (Axum) exposing the analyze contract.
//!
//! - `POST /analyze`: classify text and retrieve supporting articles
//! - `GET /healthz`: liveness
//! - `GET /ready`: loaded component summary

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::analyze_handler;
pub use state::HandlerState;

/// Response header carrying a short machine-readable outcome.
pub const NEWSPROBE_STATUS_HEADER: &str = "x-newsprobe-status";
pub const NEWSPROBE_STATUS_HEALTHY: &str = "healthy";
pub const NEWSPROBE_STATUS_READY: &str = "ready";

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/analyze", post(analyze_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub classifier: &'static str,
    pub vocabulary_size: usize,
    pub index: &'static str,
    pub index_size: usize,
    pub embedding_dim: usize,
    pub embedder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        NEWSPROBE_STATUS_HEADER,
        HeaderValue::from_static(NEWSPROBE_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Components are loaded before the listener binds, so a running server is ready.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let ctx = &state.context;

    let components = ComponentStatus {
        classifier: NEWSPROBE_STATUS_READY,
        vocabulary_size: ctx.classifier().vocabulary().len(),
        index: NEWSPROBE_STATUS_READY,
        index_size: ctx.index().len(),
        embedding_dim: ctx.index().dim(),
        embedder_mode: ctx.embedder().mode(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        NEWSPROBE_STATUS_HEADER,
        HeaderValue::from_static(NEWSPROBE_STATUS_READY),
    );

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
