//! Event store, spread handlers, and concurrent query engine for the event
//! spread service.
//!
//! Clients submit timestamped events carrying heuristic values and later ask
//! for the combined, time-gated contribution of every stored event. This
//! crate owns that computation; transports live in `spread-server`.
//!
//! # Modules
//!
//! - [`aggregator`] -- Merge algebra over heuristic value lists.
//! - [`config`] -- Configuration loading from `event-spread.yaml` into
//!   strongly-typed structs.
//! - [`dispatch`] -- Immutable [`DispatchTable`] from spread type to handler.
//! - [`error`] -- [`SpreadError`] and its status [`Code`].
//! - [`handler`] -- [`SpreadHandler`] trait and [`InstantGlobalHandler`].
//! - [`query`] -- Concurrent fan-out/fan-in [`QueryEngine`].
//! - [`service`] -- [`EventSpreadService`] facade used by transports.
//! - [`store`] -- Append-only in-memory [`EventStore`].
//!
//! [`DispatchTable`]: dispatch::DispatchTable
//! [`SpreadError`]: error::SpreadError
//! [`Code`]: error::Code
//! [`SpreadHandler`]: handler::SpreadHandler
//! [`InstantGlobalHandler`]: handler::InstantGlobalHandler
//! [`QueryEngine`]: query::QueryEngine
//! [`EventSpreadService`]: service::EventSpreadService
//! [`EventStore`]: store::EventStore

pub mod aggregator;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod query;
pub mod service;
pub mod store;

// Re-export primary types at crate root.
pub use config::{ConfigError, ServiceConfig};
pub use dispatch::{DispatchError, DispatchTable};
pub use error::{Code, SpreadError};
pub use handler::{HandlerError, InstantGlobalHandler, SpreadHandler};
pub use query::QueryEngine;
pub use service::EventSpreadService;
pub use store::EventStore;
