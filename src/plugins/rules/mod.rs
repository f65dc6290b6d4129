//! Built-in rules implemented in-process
//!
//! - **no-todo**: flags TODO/FIXME markers
//! - **max-line-length**: flags lines longer than a limit
//! - **trailing-whitespace**: reports (analyze) or strips (format) trailing whitespace
//! - **final-newline**: makes files end with exactly one newline

pub mod max_line_length;
pub mod no_todo;
pub mod whitespace;

use super::trait_def::PluginOptions;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a plugin's options bag into its typed options
pub(crate) fn parse_options<T: DeserializeOwned>(plugin: &str, options: &PluginOptions) -> Result<T> {
  serde_json::from_value(Value::Object(options.clone())).with_context(|| format!("Invalid options for {}", plugin))
}

/// 1-based line number for a 0-based line index
pub(crate) fn line_number(index: usize) -> Option<u32> {
  u32::try_from(index + 1).ok()
}
