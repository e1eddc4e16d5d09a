//! HTTP transport for the event spread service.
//!
//! This crate exposes the two service operations over JSON:
//!
//! - **`POST /api/events`** -- `AddEvent`, append an event to the queue
//! - **`POST /api/spread`** -- `GetEventSpread`, combined influence of all
//!   stored events at a query instant
//! - **`GET /`** -- service status (event count, registered spread types)
//!
//! Service errors map onto HTTP statuses: invalid arguments are `400`,
//! unregistered spread types `501`, aborted queries `500`, and missed query
//! deadlines `504`.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, serve, start_server};
pub use state::AppState;
