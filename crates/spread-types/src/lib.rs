//! Shared type definitions for the event spread service.
//!
//! This crate is the single source of truth for the data exchanged between
//! clients, the HTTP layer, and the spread core. Types flow downstream to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for stored events
//! - [`enums`] -- [`Heuristic`] and [`SpreadType`] identifiers
//! - [`structs`] -- Events, heuristic values, positions, timestamps
//! - [`messages`] -- Request/response envelopes for the service boundary

pub mod enums;
pub mod ids;
pub mod messages;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Heuristic, SpreadType};
pub use ids::EventId;
pub use messages::{
    AddEventRequest, AddEventResponse, GetEventSpreadRequest, GetEventSpreadResponse,
};
pub use structs::{Event, HeuristicValue, MAX_TIMESTAMP_NANOS, Position, StoredEvent, Timestamp};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files land in `bindings/`
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::EventId::export_all();
        let _ = crate::enums::Heuristic::export_all();
        let _ = crate::enums::SpreadType::export_all();
        let _ = crate::structs::Timestamp::export_all();
        let _ = crate::structs::Position::export_all();
        let _ = crate::structs::HeuristicValue::export_all();
        let _ = crate::structs::Event::export_all();
        let _ = crate::structs::StoredEvent::export_all();
        let _ = crate::messages::AddEventRequest::export_all();
        let _ = crate::messages::AddEventResponse::export_all();
        let _ = crate::messages::GetEventSpreadRequest::export_all();
        let _ = crate::messages::GetEventSpreadResponse::export_all();
    }
}
