//! Format runner: every formatter over the whole file set, sequentially

use super::RunObserver;
use super::model::FormatResult;
use super::registry::FormatterHandle;
use crate::core::error::{GitaiResult, PluginError};
use crate::plugins::FormatInvocation;
use serde_json::Value;
use std::path::PathBuf;

/// Run `plugins` over `files` in registration order.
///
/// Each formatter sees the on-disk result of the previous one. Modified paths
/// are unioned in first-reported order. A failing formatter aborts the
/// remaining pipeline; files already rewritten stay rewritten.
pub fn run_format(
  files: &[PathBuf],
  plugins: &[FormatterHandle],
  config: &Value,
  observer: &mut dyn RunObserver,
) -> GitaiResult<FormatResult> {
  let mut result = FormatResult::new();

  for plugin in plugins {
    let invocation = FormatInvocation {
      files,
      config,
      options: &plugin.options,
    };

    let modified = plugin
      .capability
      .format(&invocation)
      .map_err(|source| PluginError::Invocation {
        plugin: plugin.name.clone(),
        source,
      })?;

    tracing::debug!(plugin = %plugin.name, modified = modified.len(), "formatter finished");
    observer.formatter_finished(&plugin.name, modified.len());
    result.extend(modified);
  }

  Ok(result)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::error::GitaiError;
  use crate::engine::NoopObserver;
  use crate::engine::registry::PluginHandle;
  use crate::plugins::{Formatter, PluginOptions};
  use std::fs;
  use std::sync::Arc;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use tempfile::TempDir;

  /// Appends a marker to every file that does not already end with it
  struct Append(&'static str);

  impl Formatter for Append {
    fn format(&self, invocation: &FormatInvocation<'_>) -> anyhow::Result<Vec<PathBuf>> {
      let mut changed = Vec::new();
      for file in invocation.files {
        let source = fs::read_to_string(file)?;
        if !source.ends_with(self.0) {
          fs::write(file, format!("{}{}", source, self.0))?;
          changed.push(file.clone());
        }
      }
      Ok(changed)
    }
  }

  struct Failing(Arc<AtomicUsize>);

  impl Formatter for Failing {
    fn format(&self, _invocation: &FormatInvocation<'_>) -> anyhow::Result<Vec<PathBuf>> {
      self.0.fetch_add(1, Ordering::SeqCst);
      anyhow::bail!("tool missing")
    }
  }

  fn handle(name: &str, formatter: impl Formatter + 'static) -> FormatterHandle {
    PluginHandle {
      name: name.to_string(),
      capability: Arc::new(formatter),
      options: PluginOptions::new(),
    }
  }

  #[test]
  fn test_composition_and_dedup() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.js");
    fs::write(&file, "x").unwrap();
    let files = vec![file.clone()];

    let plugins = vec![handle("A", Append("a")), handle("B", Append("b"))];
    let result = run_format(&files, &plugins, &Value::Null, &mut NoopObserver).unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "xab");
    assert_eq!(result.into_vec(), vec![file]);
  }

  #[test]
  fn test_second_run_is_empty() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.ts");
    fs::write(&file, "x").unwrap();
    let files = vec![file];
    let plugins = vec![handle("A", Append(";"))];

    assert_eq!(run_format(&files, &plugins, &Value::Null, &mut NoopObserver).unwrap().len(), 1);
    assert!(run_format(&files, &plugins, &Value::Null, &mut NoopObserver).unwrap().is_empty());
  }

  #[test]
  fn test_failure_stops_pipeline_without_rollback() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.js");
    fs::write(&file, "x").unwrap();
    let files = vec![file.clone()];
    let failed = Arc::new(AtomicUsize::new(0));

    let plugins = vec![
      handle("A", Append("a")),
      handle("prettier", Failing(failed.clone())),
      handle("C", Append("c")),
    ];
    let err = run_format(&files, &plugins, &Value::Null, &mut NoopObserver).unwrap_err();

    assert!(matches!(
      err,
      GitaiError::Plugin(PluginError::Invocation { ref plugin, .. }) if plugin == "prettier"
    ));
    assert_eq!(failed.load(Ordering::SeqCst), 1);
    assert_eq!(fs::read_to_string(&file).unwrap(), "xa");
  }
}
