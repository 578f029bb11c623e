//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Largest accepted notes upload.
pub const UPLOAD_LIMIT_BYTES: usize = 25 * 1024 * 1024;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - JSON API under `/api/v1/...`
/// - Static page from the configured directory with index fallback
/// - CORS (allow any origin/method/headers) for pages served elsewhere
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let static_service = ServeDir::new(&static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/quiz", post(http::http_post_quiz))
        .route("/api/v1/chat", post(http::http_post_chat))
        .route(
            "/api/v1/offline-pack",
            post(http::http_post_offline_pack)
                .get(http::http_get_offline_pack)
                .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route("/api/v1/offline-pack/answer", post(http::http_post_pack_answer))
        .route("/api/v1/offline-packs", get(http::http_list_offline_packs))
        .route(
            "/api/v1/assistant/history",
            get(http::http_get_history).delete(http::http_delete_history),
        )
        .route("/api/v1/assistant/export", get(http::http_get_export))
        .route("/api/v1/assistant/prompts", get(http::http_get_prompts))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
