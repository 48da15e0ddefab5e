//! Handler functions for config CLI commands.
//!
//! Implements `quire config {path,get,set,init,export}` and the dotted-key
//! helpers they share.

use crate::cli::ConfigAction;
use crate::config::QuireConfig;
use quire_core::{Error, Result};
use std::path::{Path, PathBuf};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Takes the raw `--config` path because `path` and `init` must work before
/// any config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
        ConfigAction::Export { docker_env } => {
            let config = QuireConfig::load(config_path)?;
            cmd_config_export(&config, docker_env)
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = QuireConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `quire config init` to create it)");
    }
    Ok(())
}

fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = QuireConfig::load(config_path)?;
    println!("{}", config_value(&config, key)?);
    Ok(())
}

fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = QuireConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    set_in_file(&path, key, value)?;
    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => QuireConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };
    write_default_config(&path, force)?;
    println!("Config file created at {}", path.display());
    Ok(())
}

fn cmd_config_export(config: &QuireConfig, docker_env: bool) -> Result<()> {
    for line in export_lines(config, docker_env)? {
        println!("{line}");
    }
    Ok(())
}

// ============================================================================
// Testable pieces
// ============================================================================

/// Look up a dotted key in the effective configuration.
fn config_value(config: &QuireConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Rewrite one dotted key in an existing config file.
fn set_in_file(path: &Path, key: &str, value: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `quire config init` first.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(path, toml_str).map_err(|e| Error::io_with_path(e, path))
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = QuireConfig::default().to_toml_string()?;
    std::fs::write(path, toml_str).map_err(|e| Error::io_with_path(e, path))
}

fn export_lines(config: &QuireConfig, docker_env: bool) -> Result<Vec<String>> {
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let last = match parts.pop() {
        Some(last) if !last.is_empty() => last,
        _ => return Err(Error::config("Empty key path")),
    };

    let mut current = root;
    for part in parts {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part)
            .or_insert(toml::Value::Table(toml::Table::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool, integer, float, string.
fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => return toml::Value::Boolean(true),
        "false" => return toml::Value::Boolean(false),
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table(s: &str) -> toml::Value {
        toml::Value::Table(toml::from_str(s).unwrap())
    }

    #[test]
    fn test_config_value_nested_key() {
        let config = QuireConfig::default().with_content_path("pages");
        assert_eq!(config_value(&config, "content.path").unwrap(), "pages");
        assert_eq!(config_value(&config, "content.extension").unwrap(), "md");
        assert_eq!(config_value(&config, "project_name").unwrap(), "quire");
    }

    #[test]
    fn test_config_value_missing_key() {
        let err = config_value(&QuireConfig::default(), "content.nope").unwrap_err();
        assert!(err.to_string().contains("content.nope"));
    }

    #[test]
    fn test_write_default_config_and_refuse_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path, false).unwrap();
        let written: QuireConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.content.extension, "md");

        assert!(write_default_config(&path, false).is_err());
        assert!(write_default_config(&path, true).is_ok());
    }

    #[test]
    fn test_set_in_file_updates_value() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        write_default_config(&path, false).unwrap();

        set_in_file(&path, "content.include_drafts", "true").unwrap();
        set_in_file(&path, "content.path", "site/pages").unwrap();

        let updated: QuireConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(updated.content.include_drafts);
        assert_eq!(updated.content.path.as_deref(), Some("site/pages"));
    }

    #[test]
    fn test_set_in_file_requires_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = set_in_file(&dir.path().join("missing.toml"), "a", "b").unwrap_err();
        assert!(err.to_string().contains("config init"));
    }

    #[test]
    fn test_export_lines() {
        let config = QuireConfig::default();
        let plain = export_lines(&config, false).unwrap();
        assert!(plain.contains(&"QUIRE_CONTENT_EXTENSION=md".to_string()));

        let docker = export_lines(&config, true).unwrap();
        assert!(docker.iter().all(|l| l.starts_with("--env QUIRE_")));
    }

    // ------------------------------------------------------------------------
    // Dotted-key helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_nested_value() {
        let value = table("[content]\nextension = \"md\"\n");
        assert_eq!(
            get_nested_value(&value, "content.extension").and_then(|v| v.as_str()),
            Some("md")
        );
        assert!(get_nested_value(&value, "content.extension.deeper").is_none());
        assert!(get_nested_value(&value, "missing").is_none());
    }

    #[test]
    fn test_set_nested_value_creates_tables() {
        let mut value = table("");
        set_nested_value(&mut value, "a.b.c", toml::Value::Integer(1)).unwrap();
        assert_eq!(
            get_nested_value(&value, "a.b.c"),
            Some(&toml::Value::Integer(1))
        );
    }

    #[test]
    fn test_set_nested_value_through_scalar_fails() {
        let mut value = table("a = 1\n");
        assert!(set_nested_value(&mut value, "a.b", toml::Value::Integer(2)).is_err());
    }

    #[test]
    fn test_set_nested_value_empty_key_fails() {
        let mut value = table("");
        assert!(set_nested_value(&mut value, "", toml::Value::Integer(2)).is_err());
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("false"), toml::Value::Boolean(false));
        assert_eq!(parse_value("42"), toml::Value::Integer(42));
        assert_eq!(parse_value("2.5"), toml::Value::Float(2.5));
        assert_eq!(parse_value("md"), toml::Value::String("md".into()));
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value(&toml::Value::String("x".into())), "x");
        assert_eq!(format_toml_value(&toml::Value::Integer(7)), "7");
        let nested = table("[content]\nextension = \"md\"\n");
        let content = nested.get("content").unwrap();
        assert!(format_toml_value(content).contains("extension = \"md\""));
    }
}
