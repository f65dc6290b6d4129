//! File resolution: turn a target path into the ordered set of files to process

use crate::core::config::GitaiConfig;
use crate::core::error::{GitaiResult, ResultExt};
use crate::utils::absolutize;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Source patterns matched under a directory target when the config sets none
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.js", "**/*.ts"];

/// Dependency directories never descended into
pub const VENDOR_DIRS: &[&str] = &["node_modules"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: true,
};

/// Resolves targets to absolute file paths
#[derive(Debug, Clone)]
pub struct FileResolver {
  /// Directory relative targets are resolved against
  base: PathBuf,
  include: Vec<Pattern>,
  ignore: Vec<Pattern>,
}

impl FileResolver {
  /// Resolver with the default include patterns and no extra ignores
  pub fn new(base: &Path) -> Self {
    Self {
      base: base.to_path_buf(),
      include: DEFAULT_INCLUDE
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect(),
      ignore: Vec::new(),
    }
  }

  /// Resolver using the config's `include` / `ignore` patterns
  pub fn from_config(base: &Path, config: &GitaiConfig) -> GitaiResult<Self> {
    let mut resolver = Self::new(base);
    if !config.include.is_empty() {
      resolver.include = compile(&config.include)?;
    }
    resolver.ignore = compile(&config.ignore)?;
    Ok(resolver)
  }

  /// Resolve `target` to the files to process.
  ///
  /// An existing regular file is returned as-is, bypassing every pattern.
  /// Anything else is treated as a directory root; a root that does not exist
  /// simply yields no files.
  pub fn resolve(&self, target: &Path) -> GitaiResult<Vec<PathBuf>> {
    let target = absolutize(&self.base, target);
    if target.is_file() {
      return Ok(vec![target]);
    }

    let files = if target.is_dir() { self.walk(&target) } else { Vec::new() };

    tracing::debug!(target = %target.display(), count = files.len(), "resolved files");
    Ok(files)
  }

  /// Sorted depth-first walk; symlinked directories are followed, loops are skipped
  fn walk(&self, root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
      .follow_links(true)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| entry.depth() == 0 || !self.is_pruned(root, entry));

    let mut files = Vec::new();
    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(err) => {
          tracing::warn!(error = %err, "skipping unreadable entry");
          continue;
        }
      };
      if !entry.file_type().is_file() {
        continue;
      }

      let Ok(relative) = entry.path().strip_prefix(root) else {
        continue;
      };
      if self.is_included(relative) {
        files.push(entry.into_path());
      }
    }
    files
  }

  /// Dot entries, vendor directories and ignored paths are never descended into
  fn is_pruned(&self, root: &Path, entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
      return true;
    }
    if entry.file_type().is_dir() && VENDOR_DIRS.contains(&name.as_ref()) {
      return true;
    }
    entry
      .path()
      .strip_prefix(root)
      .is_ok_and(|relative| self.is_ignored(relative))
  }

  fn is_included(&self, relative: &Path) -> bool {
    self.include.iter().any(|p| p.matches_path_with(relative, MATCH_OPTIONS))
  }

  fn is_ignored(&self, relative: &Path) -> bool {
    self.ignore.iter().any(|p| p.matches_path_with(relative, MATCH_OPTIONS))
  }
}

fn compile(patterns: &[String]) -> GitaiResult<Vec<Pattern>> {
  patterns
    .iter()
    .map(|p| Pattern::new(p).with_context(|| format!("Invalid file pattern '{}'", p)))
    .collect()
}
