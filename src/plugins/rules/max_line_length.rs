//! Flags lines longer than a configured limit

use super::{line_number, parse_options};
use crate::engine::model::{PartialFinding, Severity};
use crate::plugins::trait_def::{AnalyzeInvocation, Analyzer, PluginModule};
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Options {
  #[serde(default = "default_max")]
  max: usize,
  #[serde(default = "default_severity")]
  severity: Severity,
}

fn default_max() -> usize {
  100
}

fn default_severity() -> Severity {
  Severity::Warning
}

pub struct MaxLineLength;

impl Analyzer for MaxLineLength {
  fn analyze(&self, invocation: &AnalyzeInvocation<'_>) -> Result<Vec<PartialFinding>> {
    let options: Options = parse_options("max-line-length", invocation.options)?;

    Ok(
      invocation
        .source
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
          let length = line.chars().count();
          (length > options.max).then(|| {
            PartialFinding::new(
              line_number(idx),
              options.severity,
              format!("Line is {} characters long (max {})", length, options.max),
            )
          })
        })
        .collect(),
    )
  }
}

pub fn module() -> PluginModule {
  PluginModule::analyzer(MaxLineLength)
}
