//! Request and response envelopes exchanged with clients.
//!
//! These mirror the two operations of the service boundary:
//! `AddEvent` and `GetEventSpread`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Heuristic;
use crate::ids::EventId;
use crate::structs::{Event, HeuristicValue, Timestamp};

/// Submit an event to the event queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AddEventRequest {
    /// The event to store. Absent events are rejected.
    #[serde(default)]
    pub event: Option<Event>,
}

/// Acknowledgement of a stored event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AddEventResponse {
    /// ID assigned to the stored copy.
    pub id: EventId,
}

/// Ask for the combined influence of all stored events at an instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GetEventSpreadRequest {
    /// Heuristics to report. Each appears exactly once in the response.
    #[serde(default)]
    pub heuristics: Vec<Heuristic>,
    /// The query instant.
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

/// Combined influence per requested heuristic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GetEventSpreadResponse {
    /// One summed entry per requested heuristic.
    pub values: Vec<HeuristicValue>,
}
