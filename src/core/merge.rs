//! Combining mapping answers across data sources.
//!
//! Under the hash strategy, every data source defining the key contributes a
//! mapping and the running answer is a deep merge of all of them. Sources
//! are visited highest priority first, so on a conflict the value already in
//! the running answer wins: scalar leaves from earlier sources shadow later
//! ones, nested mappings merge recursively.

use serde_json::{Map, Value};

use crate::core::types::ResolutionType;

/// Merge a newly found mapping into the running answer.
///
/// `existing` holds data from earlier (higher priority) sources and wins on
/// conflicts. With the `deeper` merge behavior, conflicting arrays are
/// concatenated (higher priority elements first) instead of shadowed.
pub fn merge_answer(
    new: Map<String, Value>,
    existing: Map<String, Value>,
    resolution: &ResolutionType,
) -> Map<String, Value> {
    let deep_arrays = resolution.merge_behavior() == Some("deeper");
    merge_maps(new, existing, deep_arrays)
}

fn merge_maps(
    new: Map<String, Value>,
    mut existing: Map<String, Value>,
    deep_arrays: bool,
) -> Map<String, Value> {
    let mut merged = Map::new();

    for (key, mine) in new {
        let value = match existing.remove(&key) {
            Some(theirs) => combine(mine, theirs, deep_arrays),
            None => mine,
        };
        merged.insert(key, value);
    }

    // Keys only the higher priority sources define.
    for (key, theirs) in existing {
        merged.insert(key, theirs);
    }

    merged
}

fn combine(mine: Value, theirs: Value, deep_arrays: bool) -> Value {
    match (mine, theirs) {
        (Value::Object(new), Value::Object(existing)) => {
            Value::Object(merge_maps(new, existing, deep_arrays))
        }
        (Value::Array(new), Value::Array(mut existing)) if deep_arrays => {
            existing.extend(new);
            Value::Array(existing)
        }
        (_, theirs) => theirs,
    }
}
