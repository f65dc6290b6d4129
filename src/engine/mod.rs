//! Plugin orchestration engine
//!
//! - **resolver**: target path to ordered file list
//! - **registry**: plugin references to loaded capability handles
//! - **analysis** / **format**: sequential runners over the resolved files
//!
//! [`Engine`] wires them together: plugins are loaded before files are
//! resolved, so a bad plugin entry fails the run before anything touches disk.

pub mod model;
pub mod registry;
pub mod resolver;

mod analysis;
mod format;

pub use analysis::run_analysis;
pub use format::run_format;
pub use model::{Finding, FormatResult};
pub use registry::PluginRegistry;

use crate::core::config::GitaiConfig;
use crate::core::error::GitaiResult;
use resolver::FileResolver;
use std::path::{Path, PathBuf};

/// Progress callbacks from a run; none of them affect results
pub trait RunObserver {
  fn files_resolved(&mut self, _count: usize) {}
  fn file_analyzed(&mut self, _file: &Path) {}
  fn formatter_finished(&mut self, _plugin: &str, _modified: usize) {}
}

/// Observer that ignores everything
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// One repository's configuration bound to a plugin registry
pub struct Engine<'a> {
  root: PathBuf,
  config: &'a GitaiConfig,
  registry: PluginRegistry,
}

impl<'a> Engine<'a> {
  /// Engine resolving built-in and relative plugins only
  pub fn new(root: &Path, config: &'a GitaiConfig) -> Self {
    Self::with_registry(root, config, PluginRegistry::new())
  }

  pub fn with_registry(root: &Path, config: &'a GitaiConfig, registry: PluginRegistry) -> Self {
    Self {
      root: root.to_path_buf(),
      config,
      registry,
    }
  }

  /// Analyze every file under `target` with the configured `plugins`
  pub fn analyze(&self, target: &Path) -> GitaiResult<Vec<Finding>> {
    self.analyze_with_observer(target, &mut NoopObserver)
  }

  pub fn analyze_with_observer(&self, target: &Path, observer: &mut dyn RunObserver) -> GitaiResult<Vec<Finding>> {
    let plugins = self.registry.load_analyzers(&self.config.plugins, &self.root)?;
    let files = self.resolve(target)?;
    observer.files_resolved(files.len());

    tracing::info!(files = files.len(), plugins = plugins.len(), "running analysis");
    run_analysis(&files, &plugins, &self.config.raw, observer)
  }

  /// Format every file under `target` with the configured `formatters`
  ///
  /// The default `.` target is replaced by `formatDir` when configured.
  pub fn format(&self, target: &Path) -> GitaiResult<FormatResult> {
    self.format_with_observer(target, &mut NoopObserver)
  }

  pub fn format_with_observer(&self, target: &Path, observer: &mut dyn RunObserver) -> GitaiResult<FormatResult> {
    let plugins = self.registry.load_formatters(&self.config.formatters, &self.root)?;
    let files = self.resolve(self.config.format_target(target))?;
    observer.files_resolved(files.len());

    tracing::info!(files = files.len(), formatters = plugins.len(), "running formatters");
    run_format(&files, &plugins, &self.config.raw, observer)
  }

  fn resolve(&self, target: &Path) -> GitaiResult<Vec<PathBuf>> {
    FileResolver::from_config(&self.root, self.config)?.resolve(target)
  }
}
