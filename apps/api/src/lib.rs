//! HTTP service behind the university map.
//!
//! Serves a liveness probe and a cleaned list of institutions pulled from
//! OpenAlex. The map clients only depend on `/health` and `/universities`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod openalex;
pub mod state;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Routes plus CORS for the front-end origin and request tracing.
pub fn router(state: Arc<AppState>, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/universities", get(handlers::universities_handler))
        .route("/universities_debug", get(handlers::universities_debug_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
