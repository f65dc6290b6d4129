//! Shared data model for the orchestration engine
//!
//! Analyzers return [`PartialFinding`]s; the analysis runner attributes each to
//! its file and plugin, producing immutable [`Finding`]s. Formatters contribute
//! modified paths to a single duplicate-free [`FormatResult`].

use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Severity of a finding, ordered `Info < Warning < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  /// Informational message (not an issue)
  Info,
  /// Warning (should be addressed)
  Warning,
  /// Error (must be fixed)
  Error,
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Severity::Info => write!(f, "info"),
      Severity::Warning => write!(f, "warning"),
      Severity::Error => write!(f, "error"),
    }
  }
}

impl FromStr for Severity {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "info" => Ok(Severity::Info),
      "warning" | "warn" => Ok(Severity::Warning),
      "error" => Ok(Severity::Error),
      other => Err(format!("unknown severity '{}' (expected info, warning or error)", other)),
    }
  }
}

/// Plugins may report severity by name or with ESLint numerals (0, 1, 2)
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
  Name(String),
  Level(u64),
}

impl<'de> Deserialize<'de> for Severity {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    match SeverityRepr::deserialize(deserializer)? {
      SeverityRepr::Name(name) => name.parse().map_err(de::Error::custom),
      SeverityRepr::Level(0) => Ok(Severity::Info),
      SeverityRepr::Level(1) => Ok(Severity::Warning),
      SeverityRepr::Level(2) => Ok(Severity::Error),
      SeverityRepr::Level(other) => Err(de::Error::custom(format!("severity level {} out of range 0..=2", other))),
    }
  }
}

/// Line 0 and a missing line both mean "whole file"
fn deserialize_line<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<u64>::deserialize(deserializer)? {
    None | Some(0) => Ok(None),
    Some(line) => u32::try_from(line)
      .map(Some)
      .map_err(|_| de::Error::custom(format!("line {} out of range", line))),
  }
}

/// A finding as returned by an analyzer, before attribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialFinding {
  /// 1-based line, `None` for the whole file
  #[serde(default, deserialize_with = "deserialize_line")]
  pub line: Option<u32>,
  pub severity: Severity,
  pub message: String,
}

impl PartialFinding {
  pub fn new(line: Option<u32>, severity: Severity, message: impl Into<String>) -> Self {
    Self {
      line: line.filter(|l| *l > 0),
      severity,
      message: message.into(),
    }
  }

  /// Create a warning-level finding
  pub fn warning(line: Option<u32>, message: impl Into<String>) -> Self {
    Self::new(line, Severity::Warning, message)
  }

  /// Create an error-level finding
  pub fn error(line: Option<u32>, message: impl Into<String>) -> Self {
    Self::new(line, Severity::Error, message)
  }
}

/// One reported issue, attributed to exactly one plugin and one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
  file: PathBuf,
  line: Option<u32>,
  severity: Severity,
  message: String,
  plugin: String,
}

impl Finding {
  /// Stamp file and plugin attribution onto an analyzer result
  pub fn attribute(partial: PartialFinding, file: &Path, plugin: &str) -> Self {
    Self {
      file: file.to_path_buf(),
      line: partial.line,
      severity: partial.severity,
      message: partial.message,
      plugin: plugin.to_string(),
    }
  }

  /// Absolute path of the analyzed file
  pub fn file(&self) -> &Path {
    &self.file
  }

  /// 1-based line, `None` when the finding covers the whole file
  pub fn line(&self) -> Option<u32> {
    self.line
  }

  pub fn severity(&self) -> Severity {
    self.severity
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  /// Reference of the plugin that produced this finding, as written in configuration
  pub fn plugin(&self) -> &str {
    &self.plugin
  }
}

/// Count findings by severity: (errors, warnings, info)
pub fn count_by_severity(findings: &[Finding]) -> (usize, usize, usize) {
  let mut errors = 0;
  let mut warnings = 0;
  let mut info = 0;

  for finding in findings {
    match finding.severity {
      Severity::Error => errors += 1,
      Severity::Warning => warnings += 1,
      Severity::Info => info += 1,
    }
  }

  (errors, warnings, info)
}

/// Files modified by formatters during a run, in first-reported order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatResult {
  modified: Vec<PathBuf>,
  #[serde(skip)]
  seen: HashSet<PathBuf>,
}

impl FormatResult {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a modified path; returns false if it was already recorded
  pub fn insert(&mut self, path: PathBuf) -> bool {
    if !self.seen.insert(path.clone()) {
      return false;
    }
    self.modified.push(path);
    true
  }

  pub fn len(&self) -> usize {
    self.modified.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modified.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
    self.modified.iter()
  }

  #[cfg(test)]
  pub fn into_vec(self) -> Vec<PathBuf> {
    self.modified
  }
}

impl Extend<PathBuf> for FormatResult {
  fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, iter: I) {
    for path in iter {
      self.insert(path);
    }
  }
}
