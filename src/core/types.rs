//! Shared types for the lookup engine.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Variables available for interpolation during a single lookup.
///
/// Read-only for the duration of the call; delegated lookups see the same
/// scope as their caller.
pub type Scope = HashMap<String, String>;

/// How answers from multiple data sources are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Stop at the first source producing a non-null value.
    First,
    /// Collect values from every source into a list, in source order.
    Array,
    /// Deep-merge mapping values from every source; earlier sources win.
    Hash,
}

/// The caller-facing resolution request.
///
/// `Options` carries a mapping of merge options and always resolves to the
/// [`Strategy::Hash`] strategy.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResolutionType {
    #[default]
    First,
    Array,
    Hash,
    Options(Map<String, Value>),
}

impl ResolutionType {
    /// Map this resolution request to its merge strategy.
    pub fn strategy(&self) -> Strategy {
        match self {
            ResolutionType::First => Strategy::First,
            ResolutionType::Array => Strategy::Array,
            ResolutionType::Hash | ResolutionType::Options(_) => Strategy::Hash,
        }
    }

    /// The `behavior` merge option, when one was requested.
    pub fn merge_behavior(&self) -> Option<&str> {
        match self {
            ResolutionType::Options(options) => options.get("behavior").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// Per-call lookup parameters, created fresh for each top-level lookup.
///
/// Delegated calls extend a copy (see [`LookupOptions::with_extra`]); the
/// original is never mutated.
#[derive(Debug, Clone)]
pub struct LookupOptions {
    /// The original raw key string.
    pub key: String,
    pub resolution: ResolutionType,
    pub order_override: Option<String>,
    /// Opaque extra parameters attached by a delegation call site.
    pub extra: Option<String>,
}

impl LookupOptions {
    pub fn new(key: &str, resolution: ResolutionType, order_override: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            resolution,
            order_override: order_override.map(str::to_string),
            extra: None,
        }
    }

    /// Return a copy of these options carrying delegation parameters.
    pub fn with_extra(&self, params: &str) -> Self {
        let mut options = self.clone();
        options.extra = Some(params.to_string());
        options
    }
}

/// Human-readable name of a JSON value's shape, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
