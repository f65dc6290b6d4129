//! ESLint integration: per-file analysis and batch autofix

use super::{ToolOptions, format_batch, path_args, run_tool};
use crate::engine::model::{PartialFinding, Severity};
use crate::plugins::rules::parse_options;
use crate::plugins::trait_def::{AnalyzeInvocation, Analyzer, FormatInvocation, Formatter, PluginModule};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// ESLint exits 1 when it reports lint errors; only 2 and above are failures
const ESLINT_OK: &[i32] = &[0, 1];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EslintFileResult {
  #[serde(default)]
  messages: Vec<EslintMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EslintMessage {
  #[serde(default)]
  rule_id: Option<String>,
  message: String,
  #[serde(default)]
  line: Option<u32>,
  #[serde(default)]
  severity: u8,
}

impl EslintMessage {
  fn into_finding(self) -> PartialFinding {
    let message = match self.rule_id {
      Some(rule) => format!("[{}] {}", rule, self.message),
      None => self.message,
    };
    match self.severity {
      2 => PartialFinding::error(self.line, message),
      1 => PartialFinding::warning(self.line, message),
      _ => PartialFinding::new(self.line, Severity::Info, message),
    }
  }
}

fn parse_report(stdout: &[u8]) -> Result<Vec<PartialFinding>> {
  let results: Vec<EslintFileResult> = serde_json::from_slice(stdout).context("ESLint printed an unreadable report")?;
  Ok(
    results
      .into_iter()
      .flat_map(|r| r.messages)
      .map(EslintMessage::into_finding)
      .collect(),
  )
}

/// Lints one file with ESLint
pub struct Eslint;

impl Analyzer for Eslint {
  fn analyze(&self, invocation: &AnalyzeInvocation<'_>) -> Result<Vec<PartialFinding>> {
    let options: ToolOptions = parse_options("eslint", invocation.options)?;

    let mut args = vec!["--format".to_string(), "json".to_string()];
    args.extend(options.args.iter().cloned());
    args.push(invocation.file.to_string_lossy().into_owned());

    let output = run_tool(options.program("eslint"), &args, ESLINT_OK)?;
    parse_report(&output.stdout)
  }
}

/// Applies ESLint autofixes to the whole batch in one run
pub struct EslintFix;

impl Formatter for EslintFix {
  fn format(&self, invocation: &FormatInvocation<'_>) -> Result<Vec<PathBuf>> {
    let options: ToolOptions = parse_options("eslint-fix", invocation.options)?;

    format_batch(invocation.files, || {
      let mut args = vec!["--fix".to_string(), "--format".to_string(), "json".to_string()];
      args.extend(options.args.iter().cloned());
      args.extend(path_args(invocation.files));
      run_tool(options.program("eslint"), &args, ESLINT_OK)?;
      Ok(())
    })
  }
}

pub fn analyzer_module() -> PluginModule {
  PluginModule::analyzer(Eslint)
}

pub fn fix_module() -> PluginModule {
  PluginModule::formatter(EslintFix)
}
