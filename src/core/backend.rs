//! The backend capability and the implementation-class factory.
//!
//! Every backend, the router included, answers lookups through the same
//! [`DataBackend`] interface, which is what makes delegation uniform: a
//! delegation target may be a leaf backend or a whole nested router.
//!
//! Implementation classes are resolved through an explicit factory keyed by
//! exact class name rather than by naming convention, so a typo in
//! `backend_class` fails router construction with a clear error.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::Settings;
use crate::core::error::{LookupError, Result};
use crate::core::json::JsonBackend;
use crate::core::router::Router;
use crate::core::types::{ResolutionType, Scope};

/// The lookup capability shared by the router and every leaf backend.
pub trait DataBackend: std::fmt::Debug {
    /// Resolve `key` for `scope`, combining data sources according to
    /// `resolution`. Returns `Ok(None)` when no source defines the key.
    fn lookup(
        &self,
        key: &str,
        scope: &Scope,
        order_override: Option<&str>,
        resolution: &ResolutionType,
    ) -> Result<Option<Value>>;
}

/// Constructor for a backend implementation class.
pub type BackendConstructor = fn(Settings) -> Result<Box<dyn DataBackend>>;

fn construct_json(settings: Settings) -> Result<Box<dyn DataBackend>> {
    Ok(Box::new(JsonBackend::new(settings)?))
}

fn construct_router(settings: Settings) -> Result<Box<dyn DataBackend>> {
    Ok(Box::new(Router::new(settings)?))
}

/// The built-in implementation classes.
pub fn builtin_classes() -> HashMap<&'static str, BackendConstructor> {
    let mut classes: HashMap<&'static str, BackendConstructor> = HashMap::new();
    classes.insert("json", construct_json);
    classes.insert("router", construct_router);
    classes
}

/// Instantiate an implementation class with its effective settings.
pub fn construct(class_name: &str, settings: Settings) -> Result<Box<dyn DataBackend>> {
    match builtin_classes().get(class_name) {
        Some(constructor) => constructor(settings),
        None => Err(LookupError::UnknownBackendClass {
            name: class_name.to_string(),
        }),
    }
}
