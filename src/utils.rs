//! Utility functions for path handling

use std::path::{Component, Path, PathBuf};

/// Check if a plugin reference is path-relative (resolved against the repository root)
///
/// Returns true for `./plugin`, `../shared/plugin` and `.hidden/plugin`;
/// false for bare identifiers such as `no-todo` or `prettier`.
pub fn is_relative_reference(reference: &str) -> bool {
  reference.starts_with('.')
}

/// Make `path` absolute against `base` and normalize it lexically
///
/// `.` components are dropped and `..` pops the previous component. Symlinks are
/// not resolved and the path does not need to exist.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
  let joined = if path.is_absolute() { path.to_path_buf() } else { base.join(path) };
  normalize(&joined)
}

/// Lexically normalize a path
pub fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        // Never pop past the root
        if !matches!(out.components().next_back(), None | Some(Component::RootDir | Component::Prefix(_))) {
          out.pop();
        }
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}

/// Path for display: relative to `base` when possible, otherwise as given
pub fn display_path(path: &Path, base: &Path) -> String {
  pathdiff::diff_paths(path, base)
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or_else(|| path.to_path_buf())
    .display()
    .to_string()
}

/// Short plugin name for display: the file stem of a path reference, or the identifier itself
pub fn plugin_display_name(reference: &str) -> &str {
  if is_relative_reference(reference) {
    Path::new(reference)
      .file_stem()
      .and_then(|s| s.to_str())
      .unwrap_or(reference)
  } else {
    reference
  }
}
