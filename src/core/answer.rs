//! Recursive answer parsing and backend delegation.
//!
//! Values loaded from a data source are walked structurally: numbers and
//! booleans pass through, strings are interpolated, mappings interpolate
//! their keys and recurse into their values, lists recurse into their
//! elements. A string of the exact form `backend[<name>]` or
//! `backend[<name>,<params>]` re-routes resolution to the named registered
//! backend; an unregistered name is not an error, the literal string passes
//! through with a warning.
//!
//! While walking a mapping the parser records the path taken so far. A
//! delegated (or passed-through) result is narrowed by that path, so a
//! delegation placed at `db.password` answers with the delegate's own
//! `db.password` value. List elements recurse with a fresh path; list
//! indices are not addressable.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::backend::DataBackend;
use crate::core::error::Result;
use crate::core::interpolate::interpolate;
use crate::core::keypath::split_key;
use crate::core::router::Router;
use crate::core::types::{LookupOptions, Scope};

static BACKEND_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^backend\[([^,]+)(?:,(.*))?\]$").unwrap());

/// The router's recursive answer parser.
pub(crate) struct AnswerParser<'a> {
    pub router: &'a Router,
    pub scope: &'a Scope,
    pub options: &'a LookupOptions,
}

impl AnswerParser<'_> {
    pub fn parse(&self, data: &Value, path: &[String]) -> Result<Value> {
        match data {
            Value::Number(_) | Value::Bool(_) => Ok(data.clone()),
            Value::String(s) => self.parse_string(s, path),
            Value::Object(map) => {
                let mut answer = Map::new();
                for (key, value) in map {
                    let key = interpolate(key, self.scope);
                    let mut subpath = path.to_vec();
                    subpath.push(key.clone());
                    let parsed = self.parse(value, &subpath)?;
                    answer.insert(key, parsed);
                }
                Ok(Value::Object(answer))
            }
            Value::Array(items) => {
                let mut answer = Vec::with_capacity(items.len());
                for item in items {
                    answer.push(self.parse(item, &[])?);
                }
                Ok(Value::Array(answer))
            }
            Value::Null => Ok(Value::Null),
        }
    }

    fn parse_string(&self, data: &str, path: &[String]) -> Result<Value> {
        let Some(caps) = BACKEND_CALL_REGEX.captures(data) else {
            return Ok(Value::String(interpolate(data, self.scope)));
        };

        let name = &caps[1];
        let options = match caps.get(2) {
            Some(params) => self.options.with_extra(params.as_str()),
            None => self.options.clone(),
        };

        let result = match self.router.backend(name) {
            Some(entry) => {
                debug!(backend = %name, "delegating lookup");
                let head = split_key(&options.key)?
                    .into_iter()
                    .next()
                    .unwrap_or_default();
                // The delegate runs against the effective settings it owns;
                // the caller's settings never change.
                let answer =
                    entry
                        .instance
                        .lookup(&head, self.scope, None, &options.resolution)?;
                debug!(backend = %name, "delegated lookup finished");
                answer.unwrap_or(Value::Null)
            }
            None => {
                warn!(
                    backend = %name,
                    "backend was not configured; returning the data as-is"
                );
                Value::String(data.to_string())
            }
        };

        Ok(extract_path(&result, path))
    }
}

/// Pure structural walk: narrow `value` along `path`, yielding null as soon
/// as a segment is absent or the current value is not a mapping.
pub(crate) fn extract_path(value: &Value, path: &[String]) -> Value {
    let mut focus = value;
    for segment in path {
        match focus {
            Value::Object(map) => match map.get(segment) {
                Some(next) => focus = next,
                None => return Value::Null,
            },
            _ => return Value::Null,
        }
    }
    focus.clone()
}

/// The leaf-backend variant of the walk: identical structure, interpolated
/// strings and mapping keys, no delegation.
pub(crate) fn parse_plain(data: &Value, scope: &Scope) -> Value {
    match data {
        Value::String(s) => Value::String(interpolate(s, scope)),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (interpolate(key, scope), parse_plain(value, scope)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| parse_plain(item, scope)).collect())
        }
        other => other.clone(),
    }
}
