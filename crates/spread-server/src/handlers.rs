//! REST API endpoint handlers for the spread server.
//!
//! Handlers decode the JSON body, call into the shared
//! [`EventSpreadService`](spread_core::EventSpreadService), and encode the
//! result. Failures become [`ApiError`] responses.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Service status |
//! | `POST` | `/api/events` | `AddEvent` |
//! | `POST` | `/api/spread` | `GetEventSpread` |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use spread_types::{
    AddEventRequest, AddEventResponse, GetEventSpreadRequest, GetEventSpreadResponse, SpreadType,
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service name.
    pub service: &'static str,
    /// Number of stored events.
    pub events: usize,
    /// Spread types with a registered handler.
    pub spread_types: Vec<SpreadType>,
}

/// Report the stored event count and registered spread types.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    Ok(Json(StatusResponse {
        service: "event-spread",
        events: state.service.event_count()?,
        spread_types: state.service.dispatch().spread_types().collect(),
    }))
}

/// `POST /api/events` -- add one event to the queue.
pub async fn add_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddEventRequest>, JsonRejection>,
) -> Result<Json<AddEventResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let response = state.service.add_event(&request)?;
    debug!(event_id = %response.id, "event accepted");
    Ok(Json(response))
}

/// `POST /api/spread` -- combined influence of all stored events.
pub async fn get_event_spread(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GetEventSpreadRequest>, JsonRejection>,
) -> Result<Json<GetEventSpreadResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let response = state.service.get_event_spread(&request).await?;
    Ok(Json(response))
}
