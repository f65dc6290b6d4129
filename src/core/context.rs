//! Repository context - build once, pass everywhere
//!
//! `RepoContext` resolves the repository root (the working directory, as plugin
//! references and targets are relative to it) and attempts to load the
//! configuration once in main.rs. Commands that need configuration call
//! `require_config`, which surfaces a missing document as a configuration error.

use crate::core::config::GitaiConfig;
use crate::core::error::{ConfigError, GitaiError, GitaiResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared repository-level data for all commands
#[derive(Debug, Clone)]
pub struct RepoContext {
  /// Repository root directory (absolute path)
  pub root: PathBuf,

  /// Loaded configuration, or the error that prevented loading it
  config: Result<Arc<GitaiConfig>, Arc<GitaiError>>,
}

impl RepoContext {
  /// Build context from a root directory.
  ///
  /// A missing or invalid configuration is not an error here; it is reported
  /// when a command asks for it.
  pub fn build(root: &Path) -> Self {
    let config = GitaiConfig::load(root).map(Arc::new).map_err(Arc::new);
    if let Err(err) = &config {
      tracing::debug!(root = %root.display(), error = %err, "configuration not loaded");
    }

    Self {
      root: root.to_path_buf(),
      config,
    }
  }

  /// Get config or error if it could not be loaded.
  pub fn require_config(&self) -> GitaiResult<&Arc<GitaiConfig>> {
    match &self.config {
      Ok(config) => Ok(config),
      Err(err) => match err.as_ref() {
        GitaiError::Config(ConfigError::NotFound { root }) => {
          Err(GitaiError::Config(ConfigError::NotFound { root: root.clone() }))
        }
        other => Err(GitaiError::with_help(
          other.to_string(),
          "Fix the configuration file or regenerate it with `gitai init`.",
        )),
      },
    }
  }

  /// Get repository root as Path reference (convenience)
  pub fn root(&self) -> &Path {
    &self.root
  }
}
