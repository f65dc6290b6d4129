//! Analysis runner: every analyzer over every file, strictly in order

use super::RunObserver;
use super::model::Finding;
use super::registry::AnalyzerHandle;
use crate::core::error::{GitaiResult, PluginError, ResultExt};
use crate::plugins::AnalyzeInvocation;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Run `plugins` over `files`.
///
/// Each file is read once. Findings are grouped by file (in `files` order) and,
/// within a file, by plugin registration order; they are not re-sorted by line.
/// The first plugin failure aborts the whole run.
pub fn run_analysis(
  files: &[PathBuf],
  plugins: &[AnalyzerHandle],
  config: &Value,
  observer: &mut dyn RunObserver,
) -> GitaiResult<Vec<Finding>> {
  let mut findings = Vec::new();

  for file in files {
    let bytes = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let source = String::from_utf8_lossy(&bytes);

    for plugin in plugins {
      let invocation = AnalyzeInvocation {
        file,
        source: &source,
        config,
        options: &plugin.options,
      };

      let partials = plugin
        .capability
        .analyze(&invocation)
        .map_err(|source| PluginError::Invocation {
          plugin: plugin.name.clone(),
          source,
        })?;

      tracing::trace!(plugin = %plugin.name, file = %file.display(), count = partials.len(), "analyzed");
      findings.extend(
        partials
          .into_iter()
          .map(|partial| Finding::attribute(partial, file, &plugin.name)),
      );
    }

    observer.file_analyzed(file);
  }

  Ok(findings)
}
