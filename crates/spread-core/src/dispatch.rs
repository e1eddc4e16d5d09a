//! Immutable spread-type dispatch table.
//!
//! The table is assembled once at service construction, either from the
//! `dispatch` section of the service configuration or programmatically
//! through [`DispatchTableBuilder`], and is never mutated afterwards. The
//! service shares it with every query task through an [`Arc`].

use std::collections::BTreeMap;
use std::sync::Arc;

use spread_types::{Event, GetEventSpreadRequest, HeuristicValue, SpreadType};

use crate::config::DispatchConfig;
use crate::error::SpreadError;
use crate::handler::{InstantGlobalHandler, SpreadHandler};

/// Errors raised while assembling a [`DispatchTable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The same spread type was registered twice.
    #[error("spread type {0} registered more than once")]
    DuplicateSpreadType(SpreadType),

    /// The configuration enables a spread type with no built-in handler.
    #[error("no built-in handler for spread type {0}")]
    NoBuiltinHandler(SpreadType),
}

/// Built-in handler for a spread type, if the service ships one.
pub fn builtin_handler(spread_type: SpreadType) -> Option<Arc<dyn SpreadHandler>> {
    match spread_type {
        SpreadType::InstantGlobal => Some(Arc::new(InstantGlobalHandler::new())),
        SpreadType::Undefined => None,
    }
}

/// Mapping from [`SpreadType`] to the handler implementing it.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    handlers: BTreeMap<SpreadType, Arc<dyn SpreadHandler>>,
}

impl DispatchTable {
    /// Start building a table by hand.
    pub fn builder() -> DispatchTableBuilder {
        DispatchTableBuilder::default()
    }

    /// Build a table holding the built-in handler for every configured type.
    pub fn from_config(config: &DispatchConfig) -> Result<Self, DispatchError> {
        let mut builder = Self::builder();
        for &spread_type in &config.spread_types {
            let handler =
                builtin_handler(spread_type).ok_or(DispatchError::NoBuiltinHandler(spread_type))?;
            builder = builder.register(spread_type, handler)?;
        }
        Ok(builder.build())
    }

    /// Look up the handler for a spread type.
    ///
    /// Fails with [`SpreadError::Unimplemented`] when nothing is registered.
    pub fn resolve(&self, spread_type: SpreadType) -> Result<&Arc<dyn SpreadHandler>, SpreadError> {
        self.handlers
            .get(&spread_type)
            .ok_or(SpreadError::Unimplemented { spread_type })
    }

    /// Resolve the event's handler and compute its contribution to `request`.
    pub fn event_spread(
        &self,
        event: &Event,
        request: &GetEventSpreadRequest,
    ) -> Result<Vec<HeuristicValue>, SpreadError> {
        let handler = self.resolve(event.spread_type)?;
        Ok(handler.event_spread(event, request)?)
    }

    /// Registered spread types in ascending order.
    pub fn spread_types(&self) -> impl Iterator<Item = SpreadType> + '_ {
        self.handlers.keys().copied()
    }

    /// Number of registered spread types.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no spread type is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Accumulates registrations for a [`DispatchTable`].
#[derive(Debug, Default)]
pub struct DispatchTableBuilder {
    handlers: BTreeMap<SpreadType, Arc<dyn SpreadHandler>>,
}

impl DispatchTableBuilder {
    /// Register `handler` for `spread_type`.
    pub fn register(
        mut self,
        spread_type: SpreadType,
        handler: Arc<dyn SpreadHandler>,
    ) -> Result<Self, DispatchError> {
        if self.handlers.contains_key(&spread_type) {
            return Err(DispatchError::DuplicateSpreadType(spread_type));
        }
        self.handlers.insert(spread_type, handler);
        Ok(self)
    }

    /// Freeze the registrations into a table.
    pub fn build(self) -> DispatchTable {
        DispatchTable {
            handlers: self.handlers,
        }
    }
}
