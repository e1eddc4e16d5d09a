//! Error taxonomy for the spread core.
//!
//! Every failure that can cross the service boundary is a [`SpreadError`].
//! Each variant maps onto one of a handful of status [`Code`]s that the
//! transport layer translates into its own status representation.

use spread_types::SpreadType;

use crate::handler::HandlerError;

/// Status class of a [`SpreadError`], modelled on gRPC status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    /// The caller supplied a malformed or absent argument.
    InvalidArgument,
    /// No handler is registered for the requested spread type.
    Unimplemented,
    /// A computation failed inside the service.
    Internal,
    /// The query did not finish before its deadline.
    DeadlineExceeded,
}

impl Code {
    /// Wire name of the code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
        }
    }
}

impl core::fmt::Display for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the event store, dispatch table, and query engine.
#[derive(Debug, thiserror::Error)]
pub enum SpreadError {
    /// A submitted argument was rejected before any state changed.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Why the argument was rejected.
        message: String,
    },

    /// An event names a spread type with no registered handler.
    #[error("specified event spread type {spread_type} has not been implemented")]
    Unimplemented {
        /// The unregistered spread type.
        spread_type: SpreadType,
    },

    /// A spread handler failed while computing a contribution.
    #[error("spread handler failed: {source}")]
    Handler {
        /// The underlying handler error.
        #[from]
        source: HandlerError,
    },

    /// A per-event task died before returning a result.
    #[error("spread task failed: {message}")]
    Task {
        /// Description of the task failure.
        message: String,
    },

    /// The event store lock was poisoned by a panicking writer.
    #[error("event store lock poisoned")]
    StorePoisoned,

    /// A query was aborted because one or more per-event computations failed.
    ///
    /// Causes are ordered by the arrival position of the failing events.
    #[error("could not calculate event spread due to error(s): {}", join_causes(.causes))]
    Aborted {
        /// Every per-event failure observed by the query.
        causes: Vec<SpreadError>,
    },

    /// The query ran past its configured deadline.
    #[error("event spread query exceeded deadline of {timeout_ms}ms")]
    DeadlineExceeded {
        /// The deadline that elapsed.
        timeout_ms: u64,
    },
}

impl SpreadError {
    /// Status class of this error.
    pub const fn code(&self) -> Code {
        match self {
            Self::InvalidArgument { .. } => Code::InvalidArgument,
            Self::Unimplemented { .. } => Code::Unimplemented,
            Self::Handler { .. } | Self::Task { .. } | Self::StorePoisoned | Self::Aborted { .. } => {
                Code::Internal
            }
            Self::DeadlineExceeded { .. } => Code::DeadlineExceeded,
        }
    }

    /// The per-event failures wrapped by an aborted query.
    ///
    /// Empty for every other variant.
    pub fn causes(&self) -> &[Self] {
        match self {
            Self::Aborted { causes } => causes,
            _ => &[],
        }
    }
}

fn join_causes(causes: &[SpreadError]) -> String {
    causes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
