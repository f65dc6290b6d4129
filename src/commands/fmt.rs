//! Fmt command implementation

use crate::core::context::RepoContext;
use crate::core::error::GitaiResult;
use crate::engine::Engine;
use crate::utils::display_path;
use std::path::Path;

/// Run the fmt command
pub fn run_fmt(ctx: &RepoContext, target: &Path, json: bool) -> GitaiResult<()> {
  let config = ctx.require_config()?;
  let result = Engine::new(ctx.root(), config).format(target)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&result)?);
    return Ok(());
  }

  if result.is_empty() {
    println!("✅ All files already formatted");
    return Ok(());
  }

  println!("✨ Formatted {} file(s):", result.len());
  for file in result.iter() {
    println!("   {}", display_path(file, ctx.root()));
  }

  Ok(())
}
