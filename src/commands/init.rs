use crate::core::config::GitaiConfig;
use crate::core::context::RepoContext;
use crate::core::error::{ConfigError, GitaiError, GitaiResult};

/// Run the init command: write the default configuration to the repository root
pub fn run_init(ctx: &RepoContext) -> GitaiResult<()> {
  if let Some(existing) = GitaiConfig::find_config_path(ctx.root()) {
    return Err(GitaiError::Config(ConfigError::AlreadyExists { path: existing }));
  }

  let path = GitaiConfig::default().save(ctx.root())?;
  tracing::debug!(path = %path.display(), "wrote default configuration");

  println!("✅ Created {}", path.display());
  println!();
  println!("Next steps:");
  println!("  1. Add analyzers under `plugins` and formatters under `formatters`");
  println!("  2. Run `gitai plugins` to see the built-in plugins");
  println!("  3. Run `gitai analyze` or `gitai fmt`");

  Ok(())
}
