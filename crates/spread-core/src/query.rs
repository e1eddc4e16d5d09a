//! Concurrent fan-out/fan-in spread query engine.
//!
//! Given a store snapshot and a [`GetEventSpreadRequest`], the engine:
//!
//! 1. Seeds one zero entry per requested heuristic, so every requested
//!    heuristic appears in the response even when nothing contributes.
//! 2. Runs one handler call per snapshot event on tokio's blocking pool,
//!    tracked by a [`JoinSet`]. Handlers are synchronous and never park a
//!    runtime worker.
//! 3. Joins every task before looking at any result.
//! 4. Aborts the whole query if any task failed, discarding every partial
//!    result. The error wraps all causes in arrival order.
//! 5. Otherwise adds the contributions to the seeds in arrival order and
//!    merges them through the [`aggregator`]. Completion order never changes
//!    the floating-point sum.
//!
//! With a deadline set, an expired query cancels the calls that have not
//! started and waits for the ones already running, so no handler runs after
//! [`QueryEngine::spread`] returns. A running handler call cannot be
//! interrupted: if the returned future is dropped instead, calls already in
//! progress finish on their own and their results are discarded.

use std::sync::Arc;
use std::time::Duration;

use spread_types::{
    EventId, GetEventSpreadRequest, GetEventSpreadResponse, HeuristicValue, StoredEvent,
};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::aggregator;
use crate::dispatch::DispatchTable;
use crate::error::SpreadError;

/// Output of one per-event task: arrival position, event, handler result.
type TaskOutput = (usize, EventId, Result<Vec<HeuristicValue>, SpreadError>);

/// Per-event results keyed by arrival position.
#[derive(Debug, Default)]
struct Joined {
    contributions: Vec<(usize, Vec<HeuristicValue>)>,
    failures: Vec<(usize, SpreadError)>,
}

/// Computes spread responses against an immutable [`DispatchTable`].
#[derive(Debug, Clone)]
pub struct QueryEngine {
    dispatch: Arc<DispatchTable>,
    timeout: Option<Duration>,
}

impl QueryEngine {
    /// Create an engine over the given dispatch table, without a deadline.
    pub const fn new(dispatch: Arc<DispatchTable>) -> Self {
        Self {
            dispatch,
            timeout: None,
        }
    }

    /// Bound every query by `timeout` (`None` = unlimited).
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The dispatch table used to resolve handlers.
    pub fn dispatch(&self) -> &DispatchTable {
        &self.dispatch
    }

    /// The per-query deadline, if any.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Sum every snapshot event's contribution for each requested heuristic.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::Aborted`] wrapping every per-event failure if
    /// any event has an unregistered spread type, any handler fails, or any
    /// task panics. Returns [`SpreadError::DeadlineExceeded`] if the
    /// configured deadline elapses first.
    pub async fn spread(
        &self,
        snapshot: Vec<StoredEvent>,
        request: &GetEventSpreadRequest,
    ) -> Result<GetEventSpreadResponse, SpreadError> {
        let event_count = snapshot.len();
        let shared_request = Arc::new(request.clone());

        let mut tasks: JoinSet<TaskOutput> = JoinSet::new();
        for (position, stored) in snapshot.into_iter().enumerate() {
            let dispatch = Arc::clone(&self.dispatch);
            let request = Arc::clone(&shared_request);
            tasks.spawn_blocking(move || {
                let result = dispatch.event_spread(&stored.event, &request);
                (position, stored.id, result)
            });
        }

        let joined = match self.timeout {
            None => join_all(&mut tasks).await,
            Some(timeout) => {
                if let Ok(joined) = tokio::time::timeout(timeout, join_all(&mut tasks)).await {
                    joined
                } else {
                    tasks.abort_all();
                    while tasks.join_next().await.is_some() {}
                    let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                    warn!(timeout_ms, events = event_count, "event spread query exceeded deadline");
                    return Err(SpreadError::DeadlineExceeded { timeout_ms });
                }
            }
        };

        let Joined {
            mut contributions,
            mut failures,
        } = joined;

        if !failures.is_empty() {
            failures.sort_by_key(|(position, _)| *position);
            warn!(
                failed = failures.len(),
                events = event_count,
                "aborting event spread query"
            );
            return Err(SpreadError::Aborted {
                causes: failures.into_iter().map(|(_, e)| e).collect(),
            });
        }

        contributions.sort_by_key(|(position, _)| *position);
        let mut values: Vec<HeuristicValue> = request
            .heuristics
            .iter()
            .copied()
            .map(HeuristicValue::zero)
            .collect();
        values.extend(contributions.into_iter().flat_map(|(_, v)| v));

        let values = aggregator::merge(&values);
        debug!(
            events = event_count,
            heuristics = values.len(),
            "event spread computed"
        );
        Ok(GetEventSpreadResponse { values })
    }
}

/// Drain `tasks`, sorting each outcome into contributions or failures.
async fn join_all(tasks: &mut JoinSet<TaskOutput>) -> Joined {
    let mut joined = Joined::default();
    while let Some(next) = tasks.join_next().await {
        match next {
            Ok((position, _, Ok(values))) => joined.contributions.push((position, values)),
            Ok((position, event_id, Err(e))) => {
                warn!(event_id = %event_id, error = %e, "event spread failed");
                joined.failures.push((position, e));
            }
            Err(e) => {
                // The task's position is lost with its output; sort it last.
                warn!(error = %e, "event spread task did not complete");
                joined.failures.push((
                    usize::MAX,
                    SpreadError::Task {
                        message: e.to_string(),
                    },
                ));
            }
        }
    }
    joined
}
