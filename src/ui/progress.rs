//! Progress indicators for long-running runs
//!
//! Uses `linya`, which draws on stderr and leaves stdout to command output.

use crate::engine::RunObserver;
use linya::{Bar, Progress};
use std::path::Path;

/// Per-file progress bar for analysis runs
///
/// The bar is created once the file count is known.
pub struct FileProgress {
  progress: Progress,
  bar: Option<Bar>,
  label: String,
}

impl FileProgress {
  pub fn new(label: impl Into<String>) -> Self {
    Self {
      progress: Progress::new(),
      bar: None,
      label: label.into(),
    }
  }
}

impl RunObserver for FileProgress {
  fn files_resolved(&mut self, count: usize) {
    if count > 0 {
      self.bar = Some(self.progress.bar(count, self.label.clone()));
    }
  }

  fn file_analyzed(&mut self, _file: &Path) {
    if let Some(bar) = &self.bar {
      self.progress.inc_and_draw(bar, 1);
    }
  }
}
