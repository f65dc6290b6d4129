//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch repository in a temporary directory
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Create an empty repository
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Create a repository with `.gitai.yml` set to `config`
  pub fn with_config(config: &str) -> Result<Self> {
    let repo = Self::new()?;
    repo.write_file(".gitai.yml", config)?;
    Ok(repo)
  }

  /// Write a file, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<PathBuf> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
  }

  /// Write an executable shell script
  #[cfg(unix)]
  pub fn write_script(&self, path: &str, body: &str) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let file_path = self.write_file(path, &format!("#!/bin/sh\n{}", body))?;
    std::fs::set_permissions(&file_path, std::fs::Permissions::from_mode(0o755))?;
    Ok(file_path)
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run the gitai CLI and return its output whatever the exit status
pub fn run_gitai(cwd: &Path, args: &[&str]) -> Result<Output> {
  let gitai_bin = env!("CARGO_BIN_EXE_gitai");

  Command::new(gitai_bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("GITAI_LOG")
    .output()
    .context("Failed to run gitai")
}

/// Run the gitai CLI, failing unless it exits successfully
pub fn run_gitai_ok(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_gitai(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "gitai command failed: gitai {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
