//! Enumeration types for the event spread service.
//!
//! Both enums serialize in `SCREAMING_SNAKE_CASE` (`"MORALITY"`,
//! `"INSTANT_GLOBAL"`) so that clients can name them the same way the
//! original protocol did.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A named dimension along which event influence is measured.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Heuristic {
    /// Unset heuristic. Carries no meaning but is still aggregated like any other.
    #[default]
    Undefined,
    /// Moral standing of the world.
    Morality,
}

impl Heuristic {
    /// Wire name of the heuristic.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "UNDEFINED",
            Self::Morality => "MORALITY",
        }
    }
}

impl core::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the propagation model that governs an event's visibility.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum SpreadType {
    /// Unset spread type. No built-in handler exists for it.
    #[default]
    Undefined,
    /// Influence is fully visible everywhere from the event timestamp onward.
    InstantGlobal,
}

impl SpreadType {
    /// Wire name of the spread type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "UNDEFINED",
            Self::InstantGlobal => "INSTANT_GLOBAL",
        }
    }
}

impl core::fmt::Display for SpreadType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
