//! The leaf JSON backend.
//!
//! Resolves keys against JSON hierarchy documents with plain interpolation
//! and no delegation. This is the default implementation class routed to by
//! `backend[...]` values, and the simplest [`DataBackend`].

use serde_json::Value;

use crate::config::Settings;
use crate::core::answer::parse_plain;
use crate::core::backend::DataBackend;
use crate::core::cache::FileCache;
use crate::core::error::Result;
use crate::core::resolve::resolve_key;
use crate::core::sources::Hierarchy;
use crate::core::types::{ResolutionType, Scope};

#[derive(Debug)]
pub struct JsonBackend {
    hierarchy: Hierarchy,
    cache: FileCache,
}

impl JsonBackend {
    pub fn new(settings: Settings) -> Result<Self> {
        Ok(Self {
            hierarchy: Hierarchy::from_settings(&settings, "json"),
            cache: FileCache::new(),
        })
    }
}

impl DataBackend for JsonBackend {
    fn lookup(
        &self,
        key: &str,
        scope: &Scope,
        order_override: Option<&str>,
        resolution: &ResolutionType,
    ) -> Result<Option<Value>> {
        resolve_key(
            &self.hierarchy,
            &self.cache,
            key,
            scope,
            order_override,
            resolution,
            |value| Ok(parse_plain(value, scope)),
        )
    }
}
