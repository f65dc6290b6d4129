//! Flags unresolved TODO-style markers

use super::{line_number, parse_options};
use crate::engine::model::{PartialFinding, Severity};
use crate::plugins::trait_def::{AnalyzeInvocation, Analyzer, PluginModule};
use anyhow::{Context, Result, anyhow};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Options {
  #[serde(default = "default_keywords")]
  keywords: Vec<String>,
  #[serde(default = "default_severity")]
  severity: Severity,
}

fn default_keywords() -> Vec<String> {
  vec!["TODO".to_string(), "FIXME".to_string()]
}

fn default_severity() -> Severity {
  Severity::Warning
}

fn is_word_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_'
}

/// Pattern matching any keyword as a whole token; group 1.. holds the keyword found
fn keyword_pattern(keywords: &[String]) -> Result<Regex> {
  let alternation = keywords
    .iter()
    .map(|keyword| {
      // `\b` needs a word character on the keyword side, so `@todo` anchors on a non-word neighbour
      let left = match keyword.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:^|\W)",
      };
      let right = match keyword.chars().last() {
        Some(c) if is_word_char(c) => r"\b",
        _ => "",
      };
      format!("{}({}){}", left, regex::escape(keyword), right)
    })
    .collect::<Vec<_>>()
    .join("|");

  Regex::new(&alternation).context("Failed to build keyword pattern")
}

/// Compiled patterns are cached per keyword list, so each list is built once per run
#[derive(Default)]
pub struct NoTodo {
  patterns: Mutex<HashMap<Vec<String>, Regex>>,
}

impl NoTodo {
  fn pattern(&self, keywords: &[String]) -> Result<Regex> {
    let mut patterns = self.patterns.lock().map_err(|_| anyhow!("keyword cache poisoned"))?;
    if let Some(pattern) = patterns.get(keywords) {
      return Ok(pattern.clone());
    }
    let pattern = keyword_pattern(keywords)?;
    patterns.insert(keywords.to_vec(), pattern.clone());
    Ok(pattern)
  }
}

impl Analyzer for NoTodo {
  fn analyze(&self, invocation: &AnalyzeInvocation<'_>) -> Result<Vec<PartialFinding>> {
    let options: Options = parse_options("no-todo", invocation.options)?;
    if options.keywords.is_empty() {
      return Ok(Vec::new());
    }

    let pattern = self.pattern(&options.keywords)?;

    let mut findings = Vec::new();
    for (idx, line) in invocation.source.lines().enumerate() {
      let found = pattern
        .captures(line)
        .and_then(|c| c.iter().skip(1).flatten().next());
      if let Some(found) = found {
        findings.push(PartialFinding::new(
          line_number(idx),
          options.severity,
          format!("Unresolved {} comment", found.as_str()),
        ));
      }
    }

    Ok(findings)
  }
}

pub fn module() -> PluginModule {
  PluginModule::analyzer(NoTodo::default())
}
