//! Data-source enumeration.
//!
//! A hierarchy is an ordered list of source name patterns plus a data
//! directory. For a given scope the hierarchy yields concrete source names
//! (highest priority first) and resolves each to the document file that
//! level would be read from.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::core::interpolate::interpolate;
use crate::core::types::Scope;

/// Default file extension of hierarchy documents.
pub const DOCUMENT_EXTENSION: &str = "json";

/// The ordered data sources a backend consults.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    levels: Vec<String>,
    datadir: String,
}

/// One enumerated data source and where its document would live.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceStatus {
    pub source: String,
    pub path: PathBuf,
    pub exists: bool,
}

impl Hierarchy {
    pub fn new(levels: Vec<String>, datadir: String) -> Self {
        Self { levels, datadir }
    }

    /// Build a hierarchy from settings, taking the data directory from the
    /// named backend section (falling back to the top-level `datadir`).
    pub fn from_settings(settings: &Settings, section: &str) -> Self {
        Self::new(settings.hierarchy(), settings.datadir_for(section))
    }

    /// Enumerate source names for a scope, highest priority first.
    ///
    /// An order override is consulted before the configured levels. Every
    /// entry is interpolated against the scope; entries that interpolate to
    /// the empty string are skipped.
    pub fn datasources(&self, scope: &Scope, order_override: Option<&str>) -> Vec<String> {
        let mut sources = Vec::with_capacity(self.levels.len() + 1);

        for level in order_override.iter().copied().chain(self.levels.iter().map(String::as_str)) {
            let source = interpolate(level, scope);
            if source.is_empty() {
                continue;
            }
            sources.push(source);
        }

        sources
    }

    /// The document path a source would be read from, regardless of whether
    /// the file exists.
    pub fn candidate(&self, scope: &Scope, source: &str, extension: &str) -> PathBuf {
        let datadir = interpolate(&self.datadir, scope);
        Path::new(&datadir).join(format!("{source}.{extension}"))
    }

    /// The document path for a source, or `None` when no document exists at
    /// this hierarchy level.
    pub fn datafile(&self, scope: &Scope, source: &str, extension: &str) -> Option<PathBuf> {
        let path = self.candidate(scope, source, extension);
        if path.is_file() {
            Some(path)
        } else {
            debug!(%source, path = %path.display(), "no document for data source");
            None
        }
    }

    /// Enumerate sources together with their document paths and existence,
    /// for diagnostics.
    pub fn statuses(&self, scope: &Scope) -> Vec<SourceStatus> {
        self.datasources(scope, None)
            .into_iter()
            .map(|source| {
                let path = self.candidate(scope, &source, DOCUMENT_EXTENSION);
                let exists = path.is_file();
                SourceStatus {
                    source,
                    path,
                    exists,
                }
            })
            .collect()
    }
}
