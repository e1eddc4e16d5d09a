//! Merge algebra over [`HeuristicValue`] lists.
//!
//! Values sharing a [`Heuristic`] are summed, so merging is commutative and
//! associative: the result does not depend on input order or on where the
//! duplicates sit.

use std::collections::BTreeMap;

use spread_types::{Heuristic, HeuristicValue};

/// Collapse a list of values into one entry per heuristic, summing duplicates.
pub fn to_map(values: &[HeuristicValue]) -> BTreeMap<Heuristic, HeuristicValue> {
    let mut merged: BTreeMap<Heuristic, HeuristicValue> = BTreeMap::new();
    for hv in values {
        merged
            .entry(hv.heuristic)
            .and_modify(|existing| existing.value += hv.value)
            .or_insert(*hv);
    }
    merged
}

/// Flatten a merged map back into a list with one entry per key.
pub fn to_list(map: &BTreeMap<Heuristic, HeuristicValue>) -> Vec<HeuristicValue> {
    map.values().copied().collect()
}

/// `to_list(to_map(values))`.
pub fn merge(values: &[HeuristicValue]) -> Vec<HeuristicValue> {
    to_list(&to_map(values))
}
