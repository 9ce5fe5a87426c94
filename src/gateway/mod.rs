//! HTTP gateway (Axum) for synonym suggestion, ranking and export.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use handler::{export_markdown_handler, get_synonym_handler, rank_handler};
pub use state::HandlerState;

use crate::config::Config;
use crate::constants::GLOSAURUS_STATUS_HEADER;
use crate::embedding::Embedder;

/// Routes with request tracing only.
pub fn create_router_with_state<E>(state: HandlerState<E>) -> Router
where
    E: Embedder + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<E>))
        .route("/synonym/getSynonym", post(get_synonym_handler::<E>))
        .route("/synonym/rank", post(rank_handler::<E>))
        .route("/export/markdown", post(export_markdown_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Full application router: routes plus CORS and request timeout from `config`.
pub fn create_router<E>(state: HandlerState<E>, config: &Config) -> Router
where
    E: Embedder + 'static,
{
    create_router_with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(cors_layer(config))
}

pub fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.cors_allows_any() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
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
    pub embedder_mode: &'static str,
    pub lexicon_entries: usize,
    pub strategy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator_model: Option<String>,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(GLOSAURUS_STATUS_HEADER, HeaderValue::from_static("healthy"));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E>(State(state): State<HandlerState<E>>) -> Response
where
    E: Embedder + 'static,
{
    let embedder_mode = if state.embedder_is_stub() {
        "stub"
    } else {
        "model"
    };

    let components = ComponentStatus {
        embedder_mode,
        lexicon_entries: state.service.lexicon_entries(),
        strategy: state.service.strategy().as_str(),
        generator_model: state.service.generator_model().map(str::to_string),
    };

    let mut headers = HeaderMap::new();
    headers.insert(GLOSAURUS_STATUS_HEADER, HeaderValue::from_static("ready"));

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
