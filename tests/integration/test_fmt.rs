//! Tests for the `fmt` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_fmt_rewrites_and_is_idempotent() -> Result<()> {
  let repo = TestRepo::with_config("formatters: [trailing-whitespace, final-newline]\n")?;
  repo.write_file("src/a.js", "let a = 1;   \nlet b = 2;")?;
  repo.write_file("src/b.ts", "export {};\n")?;

  let output = run_gitai_ok(&repo.path, &["fmt"])?;
  let text = stdout(&output);
  assert!(text.contains("Formatted 1 file(s)"), "{}", text);
  assert!(text.contains("src/a.js"));
  assert_eq!(repo.read_file("src/a.js")?, "let a = 1;\nlet b = 2;\n");
  assert_eq!(repo.read_file("src/b.ts")?, "export {};\n");

  let output = run_gitai_ok(&repo.path, &["fmt", "--json"])?;
  let result: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(result["modified"], serde_json::json!([]));

  Ok(())
}

#[test]
fn test_fmt_honors_format_dir() -> Result<()> {
  let repo = TestRepo::with_config("formatters: [final-newline]\nformatDir: src\n")?;
  repo.write_file("src/a.js", "a")?;
  repo.write_file("scripts/b.js", "b")?;

  run_gitai_ok(&repo.path, &["fmt"])?;
  assert_eq!(repo.read_file("src/a.js")?, "a\n");
  assert_eq!(repo.read_file("scripts/b.js")?, "b");

  Ok(())
}

#[test]
fn test_fmt_rejects_analyzer_only_plugin() -> Result<()> {
  let repo = TestRepo::with_config("formatters: [no-todo]\n")?;
  repo.write_file("a.js", "x")?;

  let output = run_gitai(&repo.path, &["fmt"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("no-todo has no format() capability"));
  assert_eq!(repo.read_file("a.js")?, "x");

  Ok(())
}
