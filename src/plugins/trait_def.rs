//! Plugin capability traits
//!
//! A plugin is whatever implements one (or both) of the capability traits
//! below. Its kind is decided by the capability it exposes, never by a declared
//! type: a [`PluginModule`] is loaded with optional `analyze` and `format`
//! slots, and the registry picks the slot matching the section the plugin is
//! configured under.
//!
//! Capabilities return `anyhow::Result`, so implementations can report their
//! own failures however they like. The engine attributes any error to the
//! plugin's configured name and aborts the run.

use crate::engine::model::PartialFinding;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-plugin options from configuration, echoed on every invocation
pub type PluginOptions = Map<String, Value>;

/// The capability a registry load asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
  Analyze,
  Format,
}

impl Capability {
  /// Name of the capability as exposed by plugins
  pub fn name(self) -> &'static str {
    match self {
      Capability::Analyze => "analyze",
      Capability::Format => "format",
    }
  }
}

impl fmt::Display for Capability {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Input to a single analyzer call: one file
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnalyzeInvocation<'a> {
  /// Absolute path of the file
  pub file: &'a Path,
  /// Full file content, read once per file
  pub source: &'a str,
  /// The whole configuration document
  pub config: &'a Value,
  /// Options configured for this plugin
  pub options: &'a PluginOptions,
}

/// Input to a single formatter call: the whole file set
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormatInvocation<'a> {
  /// Absolute paths of every resolved file
  pub files: &'a [PathBuf],
  /// The whole configuration document
  pub config: &'a Value,
  /// Options configured for this plugin
  pub options: &'a PluginOptions,
}

/// Analyzer capability
///
/// # Example
///
/// ```rust,ignore
/// struct NoConsole;
///
/// impl Analyzer for NoConsole {
///   fn analyze(&self, invocation: &AnalyzeInvocation<'_>) -> anyhow::Result<Vec<PartialFinding>> {
///     Ok(
///       invocation
///         .source
///         .lines()
///         .enumerate()
///         .filter(|(_, line)| line.contains("console.log"))
///         .map(|(idx, _)| PartialFinding::warning(Some(idx as u32 + 1), "console.log call"))
///         .collect(),
///     )
///   }
/// }
/// ```
pub trait Analyzer: Send + Sync {
  /// Inspect one file and report findings (without file/plugin attribution)
  fn analyze(&self, invocation: &AnalyzeInvocation<'_>) -> anyhow::Result<Vec<PartialFinding>>;
}

/// Formatter capability
///
/// Formatters rewrite files in place and return the subset of `files` they
/// actually changed. Implementations must skip the write (and leave the path
/// out of the result) when the formatted content equals the original.
pub trait Formatter: Send + Sync {
  fn format(&self, invocation: &FormatInvocation<'_>) -> anyhow::Result<Vec<PathBuf>>;
}

/// A loaded plugin module: the capabilities it exposes
#[derive(Clone, Default)]
pub struct PluginModule {
  pub analyze: Option<Arc<dyn Analyzer>>,
  pub format: Option<Arc<dyn Formatter>>,
}

impl PluginModule {
  /// Module exposing only `analyze`
  pub fn analyzer(analyzer: impl Analyzer + 'static) -> Self {
    Self {
      analyze: Some(Arc::new(analyzer)),
      format: None,
    }
  }

  /// Module exposing only `format`
  pub fn formatter(formatter: impl Formatter + 'static) -> Self {
    Self {
      analyze: None,
      format: Some(Arc::new(formatter)),
    }
  }

  /// Module exposing both capabilities from one implementation
  pub fn both<P>(plugin: P) -> Self
  where
    P: Analyzer + Formatter + 'static,
  {
    let plugin = Arc::new(plugin);
    Self {
      analyze: Some(plugin.clone()),
      format: Some(plugin),
    }
  }

  /// Whether the module exposes `capability`
  pub fn exposes(&self, capability: Capability) -> bool {
    match capability {
      Capability::Analyze => self.analyze.is_some(),
      Capability::Format => self.format.is_some(),
    }
  }

  /// Names of all exposed capabilities
  pub fn capabilities(&self) -> Vec<Capability> {
    [Capability::Analyze, Capability::Format]
      .into_iter()
      .filter(|c| self.exposes(*c))
      .collect()
  }
}

impl fmt::Debug for PluginModule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PluginModule")
      .field("analyze", &self.analyze.is_some())
      .field("format", &self.format.is_some())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Both;

  impl Analyzer for Both {
    fn analyze(&self, _invocation: &AnalyzeInvocation<'_>) -> anyhow::Result<Vec<PartialFinding>> {
      Ok(Vec::new())
    }
  }

  impl Formatter for Both {
    fn format(&self, _invocation: &FormatInvocation<'_>) -> anyhow::Result<Vec<PathBuf>> {
      Ok(Vec::new())
    }
  }

  #[test]
  fn test_module_capabilities() {
    assert_eq!(PluginModule::analyzer(Both).capabilities(), vec![Capability::Analyze]);
    assert_eq!(PluginModule::formatter(Both).capabilities(), vec![Capability::Format]);
    assert_eq!(
      PluginModule::both(Both).capabilities(),
      vec![Capability::Analyze, Capability::Format]
    );
    assert!(PluginModule::default().capabilities().is_empty());
  }

  #[test]
  fn test_capability_names() {
    assert_eq!(Capability::Analyze.name(), "analyze");
    assert_eq!(Capability::Format.to_string(), "format");
  }
}
