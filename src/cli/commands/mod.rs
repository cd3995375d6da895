//! Command handlers and shared argument plumbing.

pub mod init;
pub mod lookup;
pub mod sources;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::cli::args::CommonArgs;
use crate::config::{self, Settings};
use crate::core::Scope;
use crate::core::types::type_name;

/// Load settings honoring `--config` and `--datadir` overrides.
pub(crate) fn build_settings(args: &CommonArgs) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => config::load_settings_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
            config::load_settings(&cwd)?.settings
        }
    };

    if let Some(datadir) = &args.datadir {
        settings.insert("datadir", Value::String(datadir.display().to_string()));
    }

    Ok(settings)
}

/// Build the lookup scope from `--scope-file` and repeated `-s` pairs.
///
/// Command-line pairs win over file entries. Scalar file values are
/// stringified; structured values are rejected.
pub(crate) fn build_scope(args: &CommonArgs) -> Result<Scope> {
    let mut scope = Scope::new();

    if let Some(path) = &args.scope_file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scope file: {:?}", path))?;
        let values: serde_json::Map<String, Value> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scope file: {:?}", path))?;
        for (name, value) in values {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => bail!(
                    "scope variable '{}' must be a scalar, got {}",
                    name,
                    type_name(&other)
                ),
            };
            scope.insert(name, value);
        }
    }

    for pair in &args.scope {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("scope variables must be NAME=VALUE, got '{}'", pair);
        };
        scope.insert(name.to_string(), value.to_string());
    }

    Ok(scope)
}
