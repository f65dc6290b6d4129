//! Process plugins: executables referenced by a relative path
//!
//! An executable plugin speaks a small JSON protocol:
//!
//! - `<exe> capabilities` prints a JSON array of capability names, e.g. `["analyze"]`
//! - `<exe> analyze` reads `{ file, source, config, options }` on stdin and
//!   prints an array of `{ line, severity, message }`
//! - `<exe> format` reads `{ files, config, options }` on stdin and prints the
//!   array of paths it modified
//!
//! A non-zero exit status is a failure of that invocation; stderr is carried
//! in the error.

use super::trait_def::{AnalyzeInvocation, Analyzer, Capability, FormatInvocation, Formatter, PluginModule};
use crate::engine::model::PartialFinding;
use crate::utils::absolutize;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

/// An executable plugin on disk
#[derive(Debug)]
pub struct ProcessPlugin {
  program: PathBuf,
  /// Working directory of the plugin; relative paths it prints resolve against it
  root: PathBuf,
}

impl ProcessPlugin {
  pub fn new(program: impl Into<PathBuf>, root: &Path) -> Self {
    Self {
      program: program.into(),
      root: root.to_path_buf(),
    }
  }

  /// Ask the executable which capabilities it exposes
  pub fn query_capabilities(&self) -> Result<Vec<Capability>> {
    let names: Vec<String> = self.call("capabilities", &serde_json::Value::Null)?;
    Ok(
      names
        .iter()
        .filter_map(|name| match name.as_str() {
          "analyze" => Some(Capability::Analyze),
          "format" => Some(Capability::Format),
          other => {
            tracing::debug!(program = %self.program.display(), capability = other, "ignoring unknown capability");
            None
          }
        })
        .collect(),
    )
  }

  /// Load the executable as a module exposing the capabilities it reports
  pub fn into_module(self) -> Result<PluginModule> {
    let capabilities = self.query_capabilities()?;
    let plugin = Arc::new(self);

    let mut module = PluginModule::default();
    if capabilities.contains(&Capability::Analyze) {
      module.analyze = Some(plugin.clone());
    }
    if capabilities.contains(&Capability::Format) {
      module.format = Some(plugin);
    }
    Ok(module)
  }

  /// Run `<exe> <command>` with `input` as JSON on stdin and parse JSON from stdout
  fn call<I, O>(&self, command: &str, input: &I) -> Result<O>
  where
    I: Serialize,
    O: DeserializeOwned,
  {
    let payload = serde_json::to_vec(input).context("Failed to encode plugin input")?;

    let mut child = Command::new(&self.program)
      .arg(command)
      .current_dir(&self.root)
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .with_context(|| format!("Failed to start {}", self.program.display()))?;

    // Feed stdin from a helper thread so a chatty plugin cannot block on a full stdout pipe
    let mut stdin = child.stdin.take().context("Plugin stdin unavailable")?;
    let writer = std::thread::spawn(move || {
      // A plugin that exits without reading its input closes the pipe; that is not our error
      let _ = stdin.write_all(&payload);
    });

    let output = child
      .wait_with_output()
      .with_context(|| format!("Failed to wait for {}", self.program.display()))?;
    let _ = writer.join();

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      bail!(
        "`{} {}` exited with {}\n{}",
        self.program.display(),
        command,
        output.status,
        stderr.trim()
      );
    }

    serde_json::from_slice(&output.stdout)
      .with_context(|| format!("`{} {}` printed invalid JSON", self.program.display(), command))
  }
}

impl Analyzer for ProcessPlugin {
  fn analyze(&self, invocation: &AnalyzeInvocation<'_>) -> Result<Vec<PartialFinding>> {
    self.call("analyze", invocation)
  }
}

impl Formatter for ProcessPlugin {
  fn format(&self, invocation: &FormatInvocation<'_>) -> Result<Vec<PathBuf>> {
    let modified: Vec<PathBuf> = self.call("format", invocation)?;
    Ok(modified.iter().map(|path| absolutize(&self.root, path)).collect())
  }
}
