//! Core data structs for the event spread service.
//!
//! Covers [`Event`], its [`HeuristicValue`] payload, the opaque
//! [`Position`], the protobuf-style [`Timestamp`], and the [`StoredEvent`]
//! envelope the event store keeps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Heuristic, SpreadType};
use crate::ids::EventId;

/// Largest valid value of [`Timestamp::nanos`].
pub const MAX_TIMESTAMP_NANOS: i32 = 999_999_999;

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// A point in time as whole seconds plus nanoseconds since the Unix epoch.
///
/// Mirrors the well-known protobuf `Timestamp` layout. A value is only
/// meaningful when [`nanos`](Self::nanos) lies in `0..=999_999_999` and the
/// instant fits in a [`DateTime<Utc>`]; use [`Timestamp::to_datetime`] to
/// check both.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct Timestamp {
    /// Seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second nanoseconds. Must be non-negative.
    #[serde(default)]
    pub nanos: i32,
}

impl Timestamp {
    /// Create a timestamp from raw parts without validation.
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Convert into a UTC date-time.
    ///
    /// Returns `None` when `nanos` is out of range or the instant cannot be
    /// represented.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !(0..=MAX_TIMESTAMP_NANOS).contains(&self.nanos) {
            return None;
        }
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::from_timestamp(self.seconds, nanos)
    }
}

/// Lossy for leap seconds: chrono encodes a leap second as nanos in
/// `1_000_000_000..2_000_000_000`, which has no wire form, so such an instant
/// is clamped to the last nanosecond of its second
/// (`nanos == MAX_TIMESTAMP_NANOS`). Every other instant round-trips through
/// [`Timestamp::to_datetime`] exactly.
impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        // timestamp_subsec_nanos is always below 2_000_000_000.
        let nanos = i32::try_from(dt.timestamp_subsec_nanos()).unwrap_or(MAX_TIMESTAMP_NANOS);
        Self {
            seconds: dt.timestamp(),
            nanos: nanos.min(MAX_TIMESTAMP_NANOS),
        }
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Where an event happened.
///
/// Opaque to the service core; handed through to spread handlers that
/// model spatial falloff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

// ---------------------------------------------------------------------------
// HeuristicValue
// ---------------------------------------------------------------------------

/// A magnitude along one heuristic.
///
/// Several values with the same [`Heuristic`] are additive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HeuristicValue {
    /// The dimension this value measures.
    pub heuristic: Heuristic,
    /// Magnitude along the dimension.
    #[serde(default)]
    pub value: f64,
}

impl HeuristicValue {
    /// Create a value for the given heuristic.
    pub const fn new(heuristic: Heuristic, value: f64) -> Self {
        Self { heuristic, value }
    }

    /// A zero-valued entry for the given heuristic.
    pub const fn zero(heuristic: Heuristic) -> Self {
        Self::new(heuristic, 0.0)
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A timestamped, positioned occurrence whose influence spreads over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Propagation model governing this event.
    #[serde(default)]
    pub spread_type: SpreadType,
    /// Where the event happened.
    #[serde(default)]
    pub position: Option<Position>,
    /// When the event happened.
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    /// Intrinsic contribution of the event, in submission order.
    #[serde(default)]
    pub heuristics: Vec<HeuristicValue>,
    /// Distance per second covered by non-instant propagation models.
    #[serde(default)]
    pub spread_rate: Option<f64>,
}

/// An event as held by the event store, tagged with its assigned ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StoredEvent {
    /// ID assigned at append time.
    pub id: EventId,
    /// The stored copy of the submitted event.
    pub event: Event,
}
