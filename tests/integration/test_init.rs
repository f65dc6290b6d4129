//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let repo = TestRepo::new()?;

  run_gitai_ok(&repo.path, &["init"])?;

  assert!(repo.file_exists(".gitai.yml"));
  let config = repo.read_file(".gitai.yml")?;
  assert!(config.contains("version: 1"));
  assert!(config.contains("plugins: []"));
  assert!(config.contains("formatters: []"));
  assert!(config.contains("ast: true"));
  assert!(config.contains("dataflow: true"));

  // The generated file is immediately usable
  run_gitai_ok(&repo.path, &["analyze"])?;

  Ok(())
}

#[test]
fn test_init_refuses_existing_config() -> Result<()> {
  let repo = TestRepo::with_config("version: 1\nplugins: [no-todo]\n")?;

  let output = run_gitai(&repo.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("already exists"));

  // Existing file untouched
  assert!(repo.read_file(".gitai.yml")?.contains("no-todo"));

  Ok(())
}

#[test]
fn test_plugins_lists_builtins() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_gitai_ok(&repo.path, &["plugins"])?;
  let text = stdout(&output);
  for id in ["eslint", "prettier", "no-todo", "trailing-whitespace", "final-newline"] {
    assert!(text.contains(id), "missing {} in:\n{}", id, text);
  }
  assert!(text.contains("analyze, format"));

  Ok(())
}
