//! The multi-source resolution loop.
//!
//! Walks the data sources for a scope in priority order, parses each source's
//! value for the head key, combines the results according to the requested
//! strategy, and finally descends any remaining path segments into the merged
//! answer. Shared by the router and the leaf backends, which differ only in
//! how a matched value is parsed.

use serde_json::Value;
use tracing::debug;

use crate::core::cache::FileCache;
use crate::core::error::{LookupError, Result};
use crate::core::keypath::split_key;
use crate::core::merge::merge_answer;
use crate::core::sources::{DOCUMENT_EXTENSION, Hierarchy};
use crate::core::types::{ResolutionType, Scope, Strategy, type_name};

/// Resolve `key` across the hierarchy's data sources.
///
/// `parse` turns a source's raw value into an answer fragment; a null parse
/// skips the source. Returns `Ok(None)` when no source produced an answer.
pub(crate) fn resolve_key<F>(
    hierarchy: &Hierarchy,
    cache: &FileCache,
    key: &str,
    scope: &Scope,
    order_override: Option<&str>,
    resolution: &ResolutionType,
    mut parse: F,
) -> Result<Option<Value>>
where
    F: FnMut(&Value) -> Result<Value>,
{
    let mut key_path = split_key(key)?;
    let head = key_path.remove(0);
    let strategy = resolution.strategy();
    debug!(key = %head, tail = ?key_path, ?strategy, "resolving key across data sources");

    let mut answer: Option<Value> = None;

    for source in hierarchy.datasources(scope, order_override) {
        let Some(file) = hierarchy.datafile(scope, &source, DOCUMENT_EXTENSION) else {
            continue;
        };

        let data = cache.read(&file);
        if data.is_empty() {
            continue;
        }
        let Some(value) = data.get(&head) else {
            continue;
        };
        debug!(key = %head, %source, "found key in data source");

        let new_answer = parse(value)?;
        if new_answer.is_null() {
            continue;
        }

        match strategy {
            Strategy::Array => {
                if !(new_answer.is_array() || new_answer.is_string()) {
                    return Err(LookupError::TypeMismatch {
                        expected: "array",
                        found: type_name(&new_answer),
                    });
                }
                let mut items = match answer.take() {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                items.push(new_answer);
                answer = Some(Value::Array(items));
            }
            Strategy::Hash => {
                let Value::Object(new_map) = new_answer else {
                    return Err(LookupError::TypeMismatch {
                        expected: "object",
                        found: type_name(&new_answer),
                    });
                };
                let existing = match answer.take() {
                    Some(Value::Object(map)) => map,
                    _ => serde_json::Map::new(),
                };
                answer = Some(Value::Object(merge_answer(new_map, existing, resolution)));
            }
            Strategy::First => {
                answer = Some(new_answer);
                break;
            }
        }
    }

    // Narrow the merged answer along the remaining path segments. Descent
    // stops silently once the answer goes null; a missing segment in a
    // non-null answer is an error.
    for segment in key_path {
        let Some(current) = answer.take() else {
            break;
        };
        match current {
            Value::Object(mut map) => match map.remove(&segment) {
                Some(value) if !value.is_null() => answer = Some(value),
                Some(_) => answer = None,
                None => return Err(LookupError::SubkeyNotFound { segment }),
            },
            _ => return Err(LookupError::SubkeyNotFound { segment }),
        }
    }

    Ok(answer)
}
