//! Guarded, append-only, in-memory event queue.
//!
//! The store owns deep copies of every accepted event in arrival order. Its
//! mutex is held only while appending or copying out a snapshot, never while
//! a spread handler runs, so readers and writers do not serialize each other
//! beyond a `Vec` push or clone.

use std::sync::Mutex;

use spread_types::{Event, EventId, StoredEvent};
use tracing::debug;

use crate::error::SpreadError;

/// The event queue.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Mutex<Vec<StoredEvent>>,
}

impl EventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `event` and return the ID assigned to it.
    ///
    /// Fails with [`SpreadError::InvalidArgument`] when `event` is absent;
    /// the store is left untouched in that case.
    pub fn append(&self, event: Option<&Event>) -> Result<EventId, SpreadError> {
        let event = event.ok_or_else(|| SpreadError::InvalidArgument {
            message: String::from("cannot add an empty event to the event queue"),
        })?;

        let stored = StoredEvent {
            id: EventId::new(),
            event: event.clone(),
        };
        let id = stored.id;

        let Ok(mut events) = self.events.lock() else {
            return Err(SpreadError::StorePoisoned);
        };
        events.push(stored);
        let len = events.len();
        drop(events);

        debug!(event_id = %id, spread_type = %event.spread_type, queue_len = len, "event appended");
        Ok(id)
    }

    /// Copy of every stored event in arrival order.
    ///
    /// Events appended after this call returns are not visible in the copy.
    pub fn snapshot(&self) -> Result<Vec<StoredEvent>, SpreadError> {
        let Ok(events) = self.events.lock() else {
            return Err(SpreadError::StorePoisoned);
        };
        Ok(events.clone())
    }

    /// Number of stored events.
    ///
    /// Fails with [`SpreadError::StorePoisoned`] rather than reporting an
    /// empty store when the lock is poisoned.
    pub fn len(&self) -> Result<usize, SpreadError> {
        let Ok(events) = self.events.lock() else {
            return Err(SpreadError::StorePoisoned);
        };
        Ok(events.len())
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> Result<bool, SpreadError> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use std::sync::Arc;

    use spread_types::{Heuristic, HeuristicValue, SpreadType, Timestamp};

    use super::*;
    use crate::error::Code;

    fn event(seconds: i64) -> Event {
        Event {
            spread_type: SpreadType::InstantGlobal,
            timestamp: Some(Timestamp::new(seconds, 0)),
            heuristics: vec![HeuristicValue::new(Heuristic::Morality, 100.0)],
            ..Event::default()
        }
    }

    #[test]
    fn absent_event_is_rejected() {
        let store = EventStore::new();
        let err = store.append(None).unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn append_one_event() {
        let store = EventStore::new();
        store.append(Some(&event(0))).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn events_keep_arrival_order() {
        let store = EventStore::new();
        let ids: Vec<_> = [30, 10, 20]
            .into_iter()
            .map(|s| store.append(Some(&event(s))).unwrap())
            .collect();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.len(), 3);
        let seconds: Vec<_> = snapshot
            .iter()
            .map(|s| s.event.timestamp.unwrap().seconds)
            .collect();
        assert_eq!(seconds, vec![30, 10, 20]);
        let stored_ids: Vec<_> = snapshot.iter().map(|s| s.id).collect();
        assert_eq!(stored_ids, ids);
    }

    #[test]
    fn caller_mutation_does_not_reach_store() {
        let store = EventStore::new();
        let mut original = event(0);
        store.append(Some(&original)).unwrap();

        original.heuristics[0].value = -1.0;

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot[0].event.heuristics[0].value, 100.0);
    }

    #[test]
    fn snapshot_is_isolated_from_later_appends() {
        let store = EventStore::new();
        store.append(Some(&event(0))).unwrap();
        let snapshot = store.snapshot().unwrap();

        store.append(Some(&event(1))).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn concurrent_appends_are_all_kept() {
        let store = Arc::new(EventStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..25 {
                        store.append(Some(&event(i * 100 + j))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len().unwrap(), 200);
    }

    #[test]
    #[allow(clippy::panic)]
    fn poisoned_lock_is_reported() {
        let store = Arc::new(EventStore::new());
        store.append(Some(&event(0))).unwrap();

        let poisoner = Arc::clone(&store);
        let result: std::thread::Result<()> = std::thread::spawn(move || {
            let _guard = poisoner.events.lock().unwrap();
            panic!("poison the store lock");
        })
        .join();
        assert!(result.is_err());

        assert!(matches!(store.len(), Err(SpreadError::StorePoisoned)));
        assert!(matches!(store.is_empty(), Err(SpreadError::StorePoisoned)));
        assert!(matches!(store.snapshot(), Err(SpreadError::StorePoisoned)));
        assert!(matches!(
            store.append(Some(&event(1))),
            Err(SpreadError::StorePoisoned)
        ));
    }
}
