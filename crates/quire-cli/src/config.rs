//! Configuration for the Quire CLI.
//!
//! Provides the [`QuireConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `QUIRE_CONFIG` environment variable
//! 3. XDG default: `~/.config/quire/config.toml`
//! 4. Built-in defaults

use confyg::{env, Confygery};
use quire_core::traits::ConfigProvider;
use quire_core::util::paths::{expand_path, find_dir_with_marker};
use quire_core::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Directory name used for content when `content.path` is unset.
pub const DEFAULT_CONTENT_DIR: &str = "content";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Quire CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuireConfig {
    /// Project name, shown in CLI output.
    pub project_name: String,

    /// Site root. Defaults to the nearest ancestor of the working directory
    /// that has a `content/` directory, else the working directory.
    pub base_path: Option<String>,

    /// Content-related configuration.
    pub content: ContentConfig,
}

/// Content directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Path to the content directory; relative paths resolve against `base_path`.
    pub path: Option<String>,

    /// Extension of content files, without the dot.
    pub extension: String,

    /// List drafts by default.
    #[serde(deserialize_with = "bool_from_bool_or_str")]
    pub include_drafts: bool,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for QuireConfig {
    fn default() -> Self {
        Self {
            project_name: "quire".to_string(),
            base_path: None,
            content: ContentConfig::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: None,
            extension: "md".to_string(),
            include_drafts: false,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl QuireConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("QUIRE");
        env_opts.add_section("content");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("QUIRE_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("quire").join("config.toml"))
    }

    /// Point the content directory somewhere else (the `--content` flag).
    pub fn with_content_path(mut self, path: impl Into<String>) -> Self {
        self.content.path = Some(path.into());
        self
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `QUIRE_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "QUIRE", &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for QuireConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        if let Some(p) = &self.base_path {
            return Ok(expand_path(p));
        }
        let cwd = std::env::current_dir()
            .map_err(|e| Error::config(format!("Could not determine base path: {e}")))?;
        Ok(find_dir_with_marker(&cwd, DEFAULT_CONTENT_DIR).unwrap_or(cwd))
    }

    fn content_dir(&self) -> Result<PathBuf> {
        match &self.content.path {
            Some(p) => {
                let path = expand_path(p);
                if path.is_absolute() {
                    Ok(path)
                } else {
                    Ok(self.base_path()?.join(path))
                }
            }
            None => Ok(self.base_path()?.join(DEFAULT_CONTENT_DIR)),
        }
    }

    fn content_extension(&self) -> &str {
        &self.content.extension
    }

    fn include_drafts(&self) -> bool {
        self.content.include_drafts
    }
}

// ============================================================================
// Helper: booleans from env overlays
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrStr {
    Bool(bool),
    Str(String),
}

/// Accept a TOML boolean or its string form; env overlays arrive as strings.
fn bool_from_bool_or_str<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrStr::deserialize(deserializer)? {
        BoolOrStr::Bool(b) => Ok(b),
        BoolOrStr::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            other => Err(D::Error::custom(format!(
                "invalid boolean {other:?}, expected true or false"
            ))),
        },
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
