//! Axum router construction for the spread API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the spread server.
///
/// The router includes:
/// - `GET /` -- service status
/// - `POST /api/events` -- add an event
/// - `POST /api/spread` -- query the combined spread
///
/// CORS is configured to allow any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/events", post(handlers::add_event))
        .route("/api/spread", post(handlers::get_event_spread))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
