//! The routing backend.
//!
//! A router resolves keys against its own hierarchy like any other backend,
//! but its answer parser understands `backend[...]` delegation values, and it
//! owns a registry of named delegate backends built once at construction.
//!
//! Each registry entry is instantiated with a derived effective
//! configuration (see [`Settings::effective_for`]) that the instance owns
//! for its whole lifetime. Because every backend carries its own settings,
//! delegated calls (nested ones included) need no install/restore dance
//! around shared configuration state, on any exit path.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::config::Settings;
use crate::core::answer::AnswerParser;
use crate::core::backend::{self, DataBackend};
use crate::core::cache::FileCache;
use crate::core::error::{LookupError, Result};
use crate::core::resolve::resolve_key;
use crate::core::sources::{Hierarchy, SourceStatus};
use crate::core::types::{LookupOptions, ResolutionType, Scope};

/// A registered delegate: the live instance plus the effective settings it
/// was constructed with.
#[derive(Debug)]
pub struct BackendEntry {
    pub instance: Box<dyn DataBackend>,
    pub settings: Settings,
}

#[derive(Debug)]
pub struct Router {
    hierarchy: Hierarchy,
    backends: HashMap<String, BackendEntry>,
    cache: FileCache,
}

impl Router {
    /// Build a router and its backend registry from a settings document.
    ///
    /// Any failure to resolve or construct a configured backend aborts
    /// construction; there is no partial registry.
    pub fn new(settings: Settings) -> Result<Self> {
        let mut settings = settings;
        if let Some(paths) = settings.router_paths() {
            // The override replaces the hierarchy before effective settings
            // are derived, so delegate backends inherit it too.
            settings.insert("hierarchy", paths);
        }

        let mut backends = HashMap::new();
        if let Some(backend_list) = settings.router_backends() {
            debug!(
                backends = ?backend_list.keys().collect::<Vec<_>>(),
                "initializing backends"
            );
            for (name, overrides) in backend_list {
                let overrides = match overrides {
                    Value::Object(map) => map.clone(),
                    Value::Null => serde_json::Map::new(),
                    _ => {
                        return Err(LookupError::invalid_settings(format!(
                            "backend '{name}' overrides must be an object"
                        )));
                    }
                };

                let class_name = overrides
                    .get("backend_class")
                    .and_then(Value::as_str)
                    .unwrap_or(name.as_str())
                    .to_string();
                let override_key = overrides
                    .get("backend_key")
                    .and_then(Value::as_str)
                    .unwrap_or(&class_name)
                    .to_string();

                let override_block = settings.override_block(&override_key);
                let effective = settings.effective_for(&class_name, &override_block);

                debug!(backend = %name, class = %class_name, "initializing backend");
                let instance = backend::construct(&class_name, effective.clone())?;
                backends.insert(
                    name.clone(),
                    BackendEntry {
                        instance,
                        settings: effective,
                    },
                );
            }
        }

        Ok(Self {
            hierarchy: Hierarchy::from_settings(&settings, "router"),
            backends,
            cache: FileCache::new(),
        })
    }

    /// The registered delegate for `name`, if any.
    pub fn backend(&self, name: &str) -> Option<&BackendEntry> {
        self.backends.get(name)
    }

    /// Enumerate this router's data sources for a scope, for diagnostics.
    pub fn sources(&self, scope: &Scope) -> Vec<SourceStatus> {
        self.hierarchy.statuses(scope)
    }
}

impl DataBackend for Router {
    fn lookup(
        &self,
        key: &str,
        scope: &Scope,
        order_override: Option<&str>,
        resolution: &ResolutionType,
    ) -> Result<Option<Value>> {
        let options = LookupOptions::new(key, resolution.clone(), order_override);
        let parser = AnswerParser {
            router: self,
            scope,
            options: &options,
        };
        resolve_key(
            &self.hierarchy,
            &self.cache,
            key,
            scope,
            order_override,
            resolution,
            |value| parser.parse(value, &[]),
        )
    }
}
