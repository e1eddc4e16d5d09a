//! The event spread service facade.
//!
//! [`EventSpreadService`] ties the [`EventStore`] to a [`QueryEngine`] and
//! exposes the two boundary operations, `AddEvent` and `GetEventSpread`.
//! Transport layers hold it in an [`Arc`] and call it from request handlers.

use std::sync::Arc;
use std::time::Duration;

use spread_types::{
    AddEventRequest, AddEventResponse, GetEventSpreadRequest, GetEventSpreadResponse,
};
use tracing::debug;

use crate::config::ServiceConfig;
use crate::dispatch::{DispatchError, DispatchTable};
use crate::error::SpreadError;
use crate::query::QueryEngine;
use crate::store::EventStore;

/// In-memory event spread service.
#[derive(Debug)]
pub struct EventSpreadService {
    store: EventStore,
    engine: QueryEngine,
}

impl EventSpreadService {
    /// Create a service with an empty store and the given dispatch table.
    pub fn new(dispatch: Arc<DispatchTable>) -> Self {
        Self {
            store: EventStore::new(),
            engine: QueryEngine::new(dispatch),
        }
    }

    /// Build the dispatch table and query limits from configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, DispatchError> {
        let dispatch = DispatchTable::from_config(&config.dispatch)?;
        Ok(Self::new(Arc::new(dispatch)).with_query_timeout(config.query.timeout()))
    }

    /// Bound every spread query by `timeout` (`None` = unlimited).
    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.engine = self.engine.with_timeout(timeout);
        self
    }

    /// Store the submitted event.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::InvalidArgument`] when the request carries no
    /// event.
    pub fn add_event(&self, request: &AddEventRequest) -> Result<AddEventResponse, SpreadError> {
        let id = self.store.append(request.event.as_ref())?;
        Ok(AddEventResponse { id })
    }

    /// Combined influence of all stored events at the request timestamp.
    ///
    /// The store is snapshotted once up front; events appended while the
    /// query runs are not included.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::Aborted`] if any per-event computation fails,
    /// or [`SpreadError::DeadlineExceeded`] if a configured deadline elapses.
    pub async fn get_event_spread(
        &self,
        request: &GetEventSpreadRequest,
    ) -> Result<GetEventSpreadResponse, SpreadError> {
        let snapshot = self.store.snapshot()?;
        debug!(
            events = snapshot.len(),
            heuristics = request.heuristics.len(),
            "event spread query started"
        );
        self.engine.spread(snapshot, request).await
    }

    /// Number of stored events.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::StorePoisoned`] if the store lock is poisoned.
    pub fn event_count(&self) -> Result<usize, SpreadError> {
        self.store.len()
    }

    /// The dispatch table the service was built with.
    pub fn dispatch(&self) -> &DispatchTable {
        self.engine.dispatch()
    }
}
