//! Shared application state for the spread API server.
//!
//! [`AppState`] holds the [`EventSpreadService`] that every handler calls
//! into. The service owns its own locking, so the state itself is immutable
//! and cheap to clone.

use std::sync::Arc;

use spread_core::EventSpreadService;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The event store and query engine.
    pub service: Arc<EventSpreadService>,
}

impl AppState {
    /// Wrap an already-built service.
    pub const fn new(service: Arc<EventSpreadService>) -> Self {
        Self { service }
    }
}
