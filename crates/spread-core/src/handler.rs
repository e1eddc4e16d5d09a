//! Spread handler contract and the instantaneous global reference model.
//!
//! A [`SpreadHandler`] decides how much of one event's influence is visible
//! at a query instant. Handlers are registered per [`SpreadType`] in the
//! [`DispatchTable`](crate::dispatch::DispatchTable) and must be pure: the
//! query engine calls them concurrently from independent tasks.
//!
//! Handlers that need a global map of the world should reach it through a
//! map provider service rather than shared mutable state.
//!
//! [`SpreadType`]: spread_types::SpreadType

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use spread_types::{Event, GetEventSpreadRequest, HeuristicValue, Timestamp};

use crate::aggregator;

/// Errors raised by a spread handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    /// A required timestamp was not supplied.
    #[error("{field} timestamp is missing")]
    MissingTimestamp {
        /// Which timestamp was absent (`event` or `query`).
        field: &'static str,
    },

    /// A timestamp could not be converted into a UTC instant.
    #[error("{field} timestamp is malformed: {seconds}s {nanos}ns")]
    InvalidTimestamp {
        /// Which timestamp was malformed (`event` or `query`).
        field: &'static str,
        /// Raw seconds component.
        seconds: i64,
        /// Raw nanoseconds component.
        nanos: i32,
    },

    /// A handler-specific computation failed.
    #[error("spread computation failed: {message}")]
    Computation {
        /// Description of the failure.
        message: String,
    },
}

/// A pluggable propagation model.
///
/// Implementations must be side-effect free; the same event and query must
/// always produce the same answer.
pub trait SpreadHandler: Send + Sync + core::fmt::Debug {
    /// Whether the event's influence counts as fully propagated at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when either timestamp is absent or malformed.
    fn is_propagated(&self, event: &Event, at: Option<Timestamp>) -> Result<bool, HandlerError>;

    /// The event's contribution to every heuristic named in `request`, as of
    /// the request timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the contribution cannot be computed.
    fn event_spread(
        &self,
        event: &Event,
        request: &GetEventSpreadRequest,
    ) -> Result<Vec<HeuristicValue>, HandlerError>;
}

/// Convert an optional wire timestamp into a UTC instant.
///
/// `field` names the timestamp in the resulting error.
pub fn parse_timestamp(
    timestamp: Option<Timestamp>,
    field: &'static str,
) -> Result<DateTime<Utc>, HandlerError> {
    let ts = timestamp.ok_or(HandlerError::MissingTimestamp { field })?;
    ts.to_datetime().ok_or(HandlerError::InvalidTimestamp {
        field,
        seconds: ts.seconds,
        nanos: ts.nanos,
    })
}

/// Handler for [`SpreadType::InstantGlobal`](spread_types::SpreadType::InstantGlobal).
///
/// Influence is a step function in time: absent before the event timestamp,
/// fully present everywhere from that instant onward.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantGlobalHandler;

impl InstantGlobalHandler {
    /// Create the handler.
    pub const fn new() -> Self {
        Self
    }
}

impl SpreadHandler for InstantGlobalHandler {
    fn is_propagated(&self, event: &Event, at: Option<Timestamp>) -> Result<bool, HandlerError> {
        let origin = parse_timestamp(event.timestamp, "event")?;
        let query = parse_timestamp(at, "query")?;
        Ok(query >= origin)
    }

    fn event_spread(
        &self,
        event: &Event,
        request: &GetEventSpreadRequest,
    ) -> Result<Vec<HeuristicValue>, HandlerError> {
        let propagated = self.is_propagated(event, request.timestamp)?;
        let requested: BTreeSet<_> = request.heuristics.iter().copied().collect();

        let mut values: Vec<HeuristicValue> =
            requested.iter().copied().map(HeuristicValue::zero).collect();

        if propagated {
            let intrinsic = aggregator::to_map(&event.heuristics);
            values.extend(requested.iter().filter_map(|h| intrinsic.get(h).copied()));
        }

        Ok(aggregator::merge(&values))
    }
}
