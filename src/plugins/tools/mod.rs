//! Built-in plugins backed by external tools
//!
//! - **eslint**: analyzer running `eslint --format json` per file
//! - **eslint-fix**: formatter running `eslint --fix` once over the batch
//! - **prettier**: formatter running `prettier --write` once over the batch
//!
//! Formatters decide which files changed by comparing SHA-256 fingerprints of
//! each file before and after the tool ran, so a tool run that rewrites a file
//! with identical content is not reported.

pub mod eslint;
pub mod prettier;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Options shared by tool-backed plugins
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ToolOptions {
  /// Executable to run instead of the default tool name
  #[serde(default)]
  pub bin: Option<String>,
  /// Extra arguments placed before the file list
  #[serde(default)]
  pub args: Vec<String>,
}

impl ToolOptions {
  pub fn program<'a>(&'a self, default: &'a str) -> &'a str {
    self.bin.as_deref().unwrap_or(default)
  }
}

/// Run `program` with `args`, accepting the listed exit codes
pub(crate) fn run_tool(program: &str, args: &[String], accepted: &[i32]) -> Result<Output> {
  tracing::debug!(program, ?args, "running tool");

  let output = Command::new(program)
    .args(args)
    .output()
    .with_context(|| format!("Failed to run `{}`; is it installed and on PATH?", program))?;

  let code = output.status.code();
  if !code.is_some_and(|c| accepted.contains(&c)) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    bail!("`{}` exited with {}\n{}", program, output.status, stderr.trim());
  }

  Ok(output)
}

/// SHA-256 of a file's content, `None` if it cannot be read
pub(crate) fn fingerprint(path: &Path) -> Option<[u8; 32]> {
  let bytes = fs::read(path).ok()?;
  Some(Sha256::digest(&bytes).into())
}

/// Run a batch-formatting tool and return files whose content changed
pub(crate) fn format_batch(files: &[PathBuf], run: impl FnOnce() -> Result<()>) -> Result<Vec<PathBuf>> {
  if files.is_empty() {
    return Ok(Vec::new());
  }

  let before: Vec<_> = files.iter().map(|f| fingerprint(f)).collect();
  run()?;

  Ok(
    files
      .iter()
      .zip(before)
      .filter(|(file, before)| fingerprint(file) != *before)
      .map(|(file, _)| file.clone())
      .collect(),
  )
}

pub(crate) fn path_args(files: &[PathBuf]) -> impl Iterator<Item = String> + '_ {
  files.iter().map(|f| f.to_string_lossy().into_owned())
}
