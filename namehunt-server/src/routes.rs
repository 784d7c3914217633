//! Router configuration.
//!
//! - `POST /api/check`      - probe a domain list, return every status
//! - `POST /api/generate`   - propose candidates from keywords
//! - `POST /api/categorize` - group available domains into buckets
//! - `POST /api/run`        - full streamed run (server-sent events)
//!
//! Wrong verbs get axum's default 405; every handler error is a JSON body.

use crate::handlers;
use crate::state::AppState;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/check", post(handlers::check))
        .route("/api/generate", post(handlers::generate))
        .route("/api/categorize", post(handlers::categorize))
        .route("/api/run", post(handlers::run))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
