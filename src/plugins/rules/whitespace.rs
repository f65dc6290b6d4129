//! Whitespace hygiene: trailing whitespace and final newlines

use super::line_number;
use crate::engine::model::PartialFinding;
use crate::plugins::trait_def::{AnalyzeInvocation, Analyzer, FormatInvocation, Formatter, PluginModule};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Split a line into its body and its line ending ("\r\n", "\n" or "")
fn split_ending(line: &str) -> (&str, &str) {
  if let Some(body) = line.strip_suffix("\r\n") {
    (body, "\r\n")
  } else if let Some(body) = line.strip_suffix('\n') {
    (body, "\n")
  } else {
    (line, "")
  }
}

fn strip_trailing_whitespace(source: &str) -> String {
  let mut out = String::with_capacity(source.len());
  for line in source.split_inclusive('\n') {
    let (body, ending) = split_ending(line);
    out.push_str(body.trim_end_matches([' ', '\t']));
    out.push_str(ending);
  }
  out
}

fn ensure_final_newline(source: &str) -> String {
  if source.is_empty() {
    return String::new();
  }
  let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };
  let body = source.trim_end_matches(['\n', '\r']);
  format!("{}{}", body, newline)
}

/// Rewrite each file with `transform`, returning only files whose content changed
fn rewrite_files(files: &[PathBuf], transform: impl Fn(&str) -> String) -> Result<Vec<PathBuf>> {
  let mut changed = Vec::new();
  for file in files {
    let source = read(file)?;
    let formatted = transform(&source);
    if formatted != source {
      fs::write(file, formatted).with_context(|| format!("Failed to write {}", file.display()))?;
      changed.push(file.clone());
    }
  }
  Ok(changed)
}

fn read(file: &Path) -> Result<String> {
  fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Reports trailing whitespace when analyzing, strips it when formatting
pub struct TrailingWhitespace;

impl Analyzer for TrailingWhitespace {
  fn analyze(&self, invocation: &AnalyzeInvocation<'_>) -> Result<Vec<PartialFinding>> {
    Ok(
      invocation
        .source
        .lines()
        .enumerate()
        .filter(|(_, line)| line.ends_with([' ', '\t']))
        .map(|(idx, _)| PartialFinding::warning(line_number(idx), "Trailing whitespace"))
        .collect(),
    )
  }
}

impl Formatter for TrailingWhitespace {
  fn format(&self, invocation: &FormatInvocation<'_>) -> Result<Vec<PathBuf>> {
    rewrite_files(invocation.files, strip_trailing_whitespace)
  }
}

/// Ensures files end with exactly one newline
pub struct FinalNewline;

impl Formatter for FinalNewline {
  fn format(&self, invocation: &FormatInvocation<'_>) -> Result<Vec<PathBuf>> {
    rewrite_files(invocation.files, ensure_final_newline)
  }
}

pub fn trailing_whitespace_module() -> PluginModule {
  PluginModule::both(TrailingWhitespace)
}

pub fn final_newline_module() -> PluginModule {
  PluginModule::formatter(FinalNewline)
}
