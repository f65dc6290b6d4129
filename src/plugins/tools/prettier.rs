//! Prettier integration: batch formatting

use super::{ToolOptions, format_batch, path_args, run_tool};
use crate::plugins::rules::parse_options;
use crate::plugins::trait_def::{FormatInvocation, Formatter, PluginModule};
use anyhow::Result;
use std::path::PathBuf;

/// Formats the whole batch with `prettier --write`
pub struct Prettier;

impl Formatter for Prettier {
  fn format(&self, invocation: &FormatInvocation<'_>) -> Result<Vec<PathBuf>> {
    let options: ToolOptions = parse_options("prettier", invocation.options)?;

    format_batch(invocation.files, || {
      let mut args = vec!["--write".to_string()];
      args.extend(options.args.iter().cloned());
      args.extend(path_args(invocation.files));
      run_tool(options.program("prettier"), &args, &[0])?;
      Ok(())
    })
  }
}

pub fn module() -> PluginModule {
  PluginModule::formatter(Prettier)
}
