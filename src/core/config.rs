use crate::core::error::{ConfigError, GitaiError, GitaiResult, ResultExt};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Primary configuration file written by `gitai init`
pub const CONFIG_FILE: &str = ".gitai.yml";

/// Highest configuration schema version this build understands
pub const CURRENT_VERSION: u32 = 1;

/// Repository configuration for gitai
/// Searched in order: .gitai.yml, .gitai.yaml, gitai.toml, .config/gitai.toml
///
/// Plugin lists are kept as raw values so that malformed entries are reported by
/// the plugin registry as invalid references rather than as parse failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitaiConfig {
  #[serde(default = "default_version")]
  pub version: u32,

  /// Analyzer plugin references
  #[serde(default, deserialize_with = "null_as_default")]
  pub plugins: Vec<Value>,

  /// Formatter plugin references
  #[serde(default, deserialize_with = "null_as_default")]
  pub formatters: Vec<Value>,

  /// Directory formatted when `gitai fmt` is given the default `.` target
  #[serde(default, rename = "formatDir", skip_serializing_if = "Option::is_none")]
  pub format_dir: Option<PathBuf>,

  #[serde(default, deserialize_with = "null_as_default")]
  pub lint: Map<String, Value>,

  #[serde(default, deserialize_with = "null_as_default")]
  pub analyze: Map<String, Value>,

  /// Source patterns to match under a directory target (default: `**/*.js`, `**/*.ts`)
  #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
  pub include: Vec<String>,

  /// Extra glob patterns to exclude, relative to the directory target
  #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
  pub ignore: Vec<String>,

  /// The whole document as written, handed to plugins as their global config
  #[serde(skip)]
  pub raw: Value,
}

fn default_version() -> u32 {
  CURRENT_VERSION
}

/// A key written with no value (`plugins:`) reads as its empty default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for GitaiConfig {
  fn default() -> Self {
    let mut analyze = Map::new();
    analyze.insert("ast".to_string(), Value::Bool(true));
    analyze.insert("dataflow".to_string(), Value::Bool(true));

    let mut config = Self {
      version: CURRENT_VERSION,
      plugins: Vec::new(),
      formatters: Vec::new(),
      format_dir: None,
      lint: Map::new(),
      analyze,
      include: Vec::new(),
      ignore: Vec::new(),
      raw: Value::Null,
    };
    config.raw = serde_json::to_value(&config).unwrap_or(Value::Null);
    config
  }
}

impl GitaiConfig {
  /// Find config file in search order
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = vec![
      root.join(CONFIG_FILE),
      root.join(".gitai.yaml"),
      root.join("gitai.toml"),
      root.join(".config").join("gitai.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config from the repository root (searches multiple locations)
  pub fn load(root: &Path) -> GitaiResult<Self> {
    let config_path = Self::find_config_path(root).ok_or_else(|| {
      GitaiError::Config(ConfigError::NotFound {
        root: root.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

    let is_toml = config_path.extension().is_some_and(|ext| ext == "toml");
    let config = Self::parse(&content, is_toml)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate()?;
    Ok(config)
  }

  /// Parse a configuration document (YAML unless `is_toml`)
  pub fn parse(content: &str, is_toml: bool) -> GitaiResult<Self> {
    let raw: Value = if is_toml {
      toml_edit::de::from_str(content)?
    } else {
      serde_yaml::from_str(content)?
    };

    // An empty YAML document parses as null
    let raw = if raw.is_null() { Value::Object(Map::new()) } else { raw };

    let mut config: GitaiConfig = serde_json::from_value(raw.clone())?;
    config.raw = raw;
    Ok(config)
  }

  /// Validate configuration
  pub fn validate(&self) -> GitaiResult<()> {
    if self.version != CURRENT_VERSION {
      return Err(GitaiError::Config(ConfigError::UnsupportedVersion { version: self.version }));
    }

    for pattern in self.include.iter().chain(&self.ignore) {
      glob::Pattern::new(pattern).with_context(|| format!("Invalid file pattern '{}' in configuration", pattern))?;
    }

    Ok(())
  }

  /// Save config as YAML to the default location
  pub fn save(&self, root: &Path) -> GitaiResult<PathBuf> {
    let config_path = root.join(CONFIG_FILE);
    let content = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }

  /// Directory target for `format`, honoring `formatDir` for the default `.` target
  pub fn format_target<'a>(&'a self, target: &'a Path) -> &'a Path {
    match &self.format_dir {
      Some(dir) if target == Path::new(".") => dir,
      _ => target,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_parse_yaml_defaults() {
    let config = GitaiConfig::parse("version: 1\n", false).unwrap();
    assert_eq!(config.version, 1);
    assert!(config.plugins.is_empty());
    assert!(config.formatters.is_empty());
    assert!(config.format_dir.is_none());
  }

  #[test]
  fn test_parse_empty_document() {
    let config = GitaiConfig::parse("", false).unwrap();
    assert_eq!(config.version, CURRENT_VERSION);
    assert!(config.raw.is_object());
  }

  #[test]
  fn test_parse_keeps_raw_plugin_entries() {
    let yaml = r#"
version: 1
plugins:
  - no-todo
  - path: ./rules/custom.sh
    options:
      level: strict
  - 42
formatters: []
formatDir: src
lint:
  semi: true
"#;
    let config = GitaiConfig::parse(yaml, false).unwrap();
    assert_eq!(config.plugins.len(), 3);
    assert_eq!(config.plugins[0], Value::String("no-todo".to_string()));
    assert_eq!(config.plugins[2], Value::from(42));
    assert_eq!(config.format_dir, Some(PathBuf::from("src")));
    assert_eq!(config.raw["lint"]["semi"], Value::Bool(true));
  }

  #[test]
  fn test_keys_without_values_read_as_empty() {
    let yaml = "version: 1\nplugins:\n  # - no-todo\nformatters:\nlint:\nanalyze:\nignore:\n";
    let config = GitaiConfig::parse(yaml, false).unwrap();
    assert!(config.plugins.is_empty());
    assert!(config.formatters.is_empty());
    assert!(config.lint.is_empty());
    assert!(config.analyze.is_empty());
    assert!(config.ignore.is_empty());
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_plugins_must_be_a_sequence() {
    assert!(GitaiConfig::parse("plugins: no-todo\n", false).is_err());
  }

  #[test]
  fn test_parse_toml() {
    let toml = r#"
version = 1
plugins = ["no-todo", { path = "max-line-length", options = { max = 80 } }]
"#;
    let config = GitaiConfig::parse(toml, true).unwrap();
    assert_eq!(config.plugins.len(), 2);
    assert_eq!(config.plugins[1]["options"]["max"], Value::from(80));
  }

  #[test]
  fn test_validate_rejects_unknown_version() {
    let config = GitaiConfig::parse("version: 7\n", false).unwrap();
    assert!(matches!(
      config.validate(),
      Err(GitaiError::Config(ConfigError::UnsupportedVersion { version: 7 }))
    ));
  }

  #[test]
  fn test_load_missing_config() {
    let dir = TempDir::new().unwrap();
    let err = GitaiConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, GitaiError::Config(ConfigError::NotFound { .. })));
  }

  #[test]
  fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = GitaiConfig::default().save(dir.path()).unwrap();
    assert!(path.ends_with(CONFIG_FILE));
    assert_eq!(GitaiConfig::find_config_path(dir.path()), Some(path.clone()));

    let loaded = GitaiConfig::load(dir.path()).unwrap();
    assert_eq!(loaded.version, 1);
    assert_eq!(loaded.analyze.get("ast"), Some(&Value::Bool(true)));
  }

  #[test]
  fn test_format_target_uses_format_dir_for_dot() {
    let config = GitaiConfig::parse("formatDir: packages/web\n", false).unwrap();
    assert_eq!(config.format_target(Path::new(".")), Path::new("packages/web"));
    assert_eq!(config.format_target(Path::new("lib")), Path::new("lib"));
  }
}
