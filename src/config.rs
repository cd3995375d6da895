use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value, json};

pub const CONFIG_FILE_NAME: &str = ".tierrc.json";

pub const DEFAULT_DATADIR: &str = "data";

pub const DEFAULT_HIERARCHY: &[&str] = &["common"];

/// The settings document driving a router and its backends.
///
/// Settings stay a thin wrapper over the parsed JSON mapping instead of a
/// fixed struct: the backend registry derives per-backend effective settings
/// by cloning this document, stripping the `router` section, overlaying
/// hierarchy overrides and nesting the backend's own override block. Typed
/// accessors cover the handful of keys the engine itself reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings(Map<String, Value>);

impl Settings {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// An object-valued top-level key, e.g. the `router` block or a
    /// per-backend-class section.
    pub fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.get(name).and_then(Value::as_object)
    }

    pub fn router(&self) -> Option<&Map<String, Value>> {
        self.section("router")
    }

    /// The `router.paths` hierarchy override, when present.
    pub fn router_paths(&self) -> Option<Value> {
        self.router().and_then(|router| router.get("paths")).cloned()
    }

    /// The configured backend list: backend name -> override block.
    pub fn router_backends(&self) -> Option<&Map<String, Value>> {
        self.router()
            .and_then(|router| router.get("backends"))
            .and_then(Value::as_object)
    }

    /// The hierarchy levels consulted during a lookup, highest priority
    /// first. Non-string entries are ignored; an absent key falls back to
    /// the default hierarchy.
    pub fn hierarchy(&self) -> Vec<String> {
        match self.get("hierarchy") {
            Some(Value::Array(levels)) => levels
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => DEFAULT_HIERARCHY.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The data directory for a backend section, preferring the section's
    /// own `datadir` over the top-level one.
    pub fn datadir_for(&self, section: &str) -> String {
        self.section(section)
            .and_then(|map| map.get("datadir"))
            .and_then(Value::as_str)
            .or_else(|| self.get("datadir").and_then(Value::as_str))
            .unwrap_or(DEFAULT_DATADIR)
            .to_string()
    }

    /// The extra configuration block for a backend override key: looked up
    /// at the top level first, then inside the `router` section, defaulting
    /// to an empty block.
    pub fn override_block(&self, key: &str) -> Map<String, Value> {
        if let Some(map) = self.section(key) {
            return map.clone();
        }
        if let Some(router) = self.router()
            && let Some(Value::Object(map)) = router.get(key)
        {
            return map.clone();
        }
        Map::new()
    }

    /// Derive the effective settings a backend instance runs with: this
    /// document without its `router` section, the override block's
    /// `hierarchy` (if any) promoted to the top level, and the override
    /// block itself nested under the implementation class name.
    pub fn effective_for(&self, class_name: &str, overrides: &Map<String, Value>) -> Settings {
        let mut map = self.0.clone();
        map.remove("router");
        if let Some(hierarchy) = overrides.get("hierarchy") {
            map.insert("hierarchy".to_string(), hierarchy.clone());
        }
        map.insert(class_name.to_string(), Value::Object(overrides.clone()));
        Settings(map)
    }

    /// Validate the shapes the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if let Some(hierarchy) = self.get("hierarchy") {
            let levels = hierarchy
                .as_array()
                .context("'hierarchy' must be an array of strings")?;
            for level in levels {
                match level.as_str() {
                    Some(level) if !level.is_empty() => {}
                    _ => bail!("'hierarchy' entries must be non-empty strings"),
                }
            }
        }

        if let Some(datadir) = self.get("datadir")
            && !datadir.is_string()
        {
            bail!("'datadir' must be a string");
        }

        if let Some(router) = self.get("router") {
            let router = router.as_object().context("'router' must be an object")?;
            if let Some(paths) = router.get("paths")
                && !paths
                    .as_array()
                    .is_some_and(|levels| levels.iter().all(|level| level.is_string()))
            {
                bail!("'router.paths' must be an array of strings");
            }
            if let Some(backends) = router.get("backends") {
                let backends = backends
                    .as_object()
                    .context("'router.backends' must be an object")?;
                for (name, overrides) in backends {
                    if !overrides.is_object() && !overrides.is_null() {
                        bail!("backend '{}' overrides must be an object", name);
                    }
                }
            }
        }

        Ok(())
    }
}

pub fn default_settings_json() -> Result<String> {
    let settings = json!({
        "hierarchy": ["nodes/%{node}", "env/%{environment}", "common"],
        "datadir": "data",
        "router": {
            "backends": {}
        }
    });
    serde_json::to_string_pretty(&settings).context("Failed to generate default settings.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading settings.
pub struct SettingsLoadResult {
    pub settings: Settings,
    /// True if settings were loaded from a file, false if using defaults.
    pub from_file: bool,
}

/// Load settings from an explicitly named file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {:?}", path))?;
    let map: Map<String, Value> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {:?}", path))?;
    let settings = Settings::new(map);
    settings.validate()?;
    Ok(settings)
}

/// Discover and load settings starting from `start_dir`, falling back to
/// defaults when no settings file exists.
pub fn load_settings(start_dir: &Path) -> Result<SettingsLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => Ok(SettingsLoadResult {
            settings: load_settings_file(&path)?,
            from_file: true,
        }),
        None => Ok(SettingsLoadResult {
            settings: Settings::default(),
            from_file: false,
        }),
    }
}
