use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Maximum size for a config file (1 MB).
pub const MAX_CONFIG_FILE_BYTES: u64 = 1024 * 1024;

/// Maximum recursion depth for config includes.
pub const MAX_INCLUDE_DEPTH: usize = 8;

/// Parse a JSON5 configuration string.
pub fn parse_config_json5(content: &str) -> Result<serde_json::Value> {
    let value: serde_json::Value = json5::from_str(content)?;
    Ok(value)
}

/// Read a single configuration file into a JSON value.
///
/// The format follows the extension: `.yaml`/`.yml`, `.toml`, anything else
/// is parsed as JSON5.
pub fn read_config_value(path: &Path) -> Result<serde_json::Value> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot stat config file '{}'", path.display()))?;

    if metadata.len() > MAX_CONFIG_FILE_BYTES {
        bail!(
            "Config file '{}' is {} bytes, exceeds limit of {} bytes",
            path.display(),
            metadata.len(),
            MAX_CONFIG_FILE_BYTES,
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("json");

    let value: serde_json::Value = match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in '{}'", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in '{}'", path.display()))?,
        _ => parse_config_json5(&content)
            .with_context(|| format!("Invalid JSON in '{}'", path.display()))?,
    };

    Ok(value)
}

/// Read a config file and merge any files named by its `$include` key.
///
/// Included files are merged over the including file. Relative include
/// paths resolve against the including file's directory.
pub fn read_config_with_includes(path: &Path, depth: usize) -> Result<serde_json::Value> {
    if depth > MAX_INCLUDE_DEPTH {
        bail!(
            "Config include depth exceeded {} at '{}'",
            MAX_INCLUDE_DEPTH,
            path.display(),
        );
    }

    let mut config = read_config_value(path)?;

    let includes = config
        .as_object_mut()
        .and_then(|obj| obj.remove("$include"));

    if let Some(includes) = includes {
        let include_paths = match includes {
            serde_json::Value::String(s) => vec![s],
            serde_json::Value::Array(arr) => arr
                .into_iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => {
                warn!("Invalid $include value in '{}', skipping", path.display());
                vec![]
            }
        };

        for include in &include_paths {
            let include_path = if Path::new(include).is_absolute() {
                PathBuf::from(include)
            } else {
                path.parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(include)
            };

            let included = read_config_with_includes(&include_path, depth + 1)?;
            merge_config_values(&mut config, &included);
        }
    }

    Ok(config)
}

/// Deep merge two JSON config values (source into target).
fn merge_config_values(target: &mut serde_json::Value, source: &serde_json::Value) {
    match (target, source) {
        (serde_json::Value::Object(ref mut target_map), serde_json::Value::Object(source_map)) => {
            for (key, value) in source_map {
                let entry = target_map
                    .entry(key.clone())
                    .or_insert(serde_json::Value::Null);
                merge_config_values(entry, value);
            }
        }
        (target, source) => {
            *target = source.clone();
        }
    }
}

/// Write configuration to a JSON file.
pub fn write_config_file(path: &Path, config: &serde_json::Value) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn read_json5_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.json");
        fs::write(&file, "{ media: { retinaScale: 3, }, // trailing comma\n}").unwrap();

        let config = read_config_value(&file).unwrap();
        assert_eq!(config["media"]["retinaScale"], 3);
    }

    #[test]
    fn read_yaml_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.yaml");
        fs::write(&file, "media:\n  resizeAggregate: min\n").unwrap();

        let config = read_config_value(&file).unwrap();
        assert_eq!(config["media"]["resizeAggregate"], "min");
    }

    #[test]
    fn read_toml_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = read_config_value(&file).unwrap();
        assert_eq!(config["logging"]["level"], "debug");
    }

    #[test]
    fn reject_oversized_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("huge.json");
        let content = "x".repeat((MAX_CONFIG_FILE_BYTES + 1) as usize);
        fs::write(&file, content).unwrap();

        let result = read_config_value(&file);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exceeds limit"));
    }

    #[test]
    fn include_depth_limit() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.json");
        fs::write(&file, r#"{"$include": "config.json"}"#).unwrap();

        let result = read_config_with_includes(&file, 0);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("depth exceeded"));
    }

    #[test]
    fn config_with_includes_merges() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.json");
        let extra = dir.path().join("extra.json");

        fs::write(
            &base,
            r#"{"$include": "extra.json", "media": {"retinaScale": 2}}"#,
        )
        .unwrap();
        fs::write(&extra, r#"{"media": {"resizeAggregate": "min"}}"#).unwrap();

        let config = read_config_with_includes(&base, 0).unwrap();
        assert_eq!(config["media"]["retinaScale"], 2);
        assert_eq!(config["media"]["resizeAggregate"], "min");
        assert!(config.get("$include").is_none());
    }

    #[test]
    fn merge_values_deep() {
        let mut target = serde_json::json!({"a": {"x": 1}, "b": 2});
        let source = serde_json::json!({"a": {"y": 3}, "c": 4});
        merge_config_values(&mut target, &source);

        assert_eq!(target["a"]["x"], 1);
        assert_eq!(target["a"]["y"], 3);
        assert_eq!(target["b"], 2);
        assert_eq!(target["c"], 4);
    }
}
