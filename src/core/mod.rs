//! Core lookup engine.
//!
//! The engine resolves a dotted/quoted key path against an ordered hierarchy
//! of JSON documents, merging values across hierarchy levels according to a
//! resolution strategy and routing sub-values to delegate backends:
//!
//! - `keypath`: raw key string -> path segments
//! - `interpolate`: plain `%{var}` substitution
//! - `sources`: hierarchy level enumeration and document paths
//! - `cache`: read-through document cache
//! - `merge`: hash-strategy deep merge
//! - `answer`: recursive answer parsing and `backend[...]` delegation
//! - `backend`: the lookup capability and the implementation-class factory
//! - `json`: the leaf JSON backend
//! - `router`: the routing backend and its registry

mod answer;
pub mod backend;
pub mod cache;
pub mod error;
pub mod interpolate;
pub mod json;
pub mod keypath;
pub mod merge;
mod resolve;
pub mod router;
pub mod sources;
pub mod types;

pub use backend::DataBackend;
pub use error::{LookupError, Result};
pub use json::JsonBackend;
pub use keypath::split_key;
pub use router::{BackendEntry, Router};
pub use sources::{Hierarchy, SourceStatus};
pub use types::{LookupOptions, ResolutionType, Scope, Strategy};
