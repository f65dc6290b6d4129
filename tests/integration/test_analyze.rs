//! Tests for the `analyze` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_analyze_reports_findings_and_fails() -> Result<()> {
  let repo = TestRepo::with_config("version: 1\nplugins:\n  - no-todo\n")?;
  repo.write_file("src/app.js", "const a = 1;\n// TODO: remove\n")?;
  repo.write_file("src/clean.ts", "export const b = 2;\n")?;
  repo.write_file("node_modules/dep/index.js", "// TODO vendored\n")?;

  let output = run_gitai(&repo.path, &["analyze"])?;
  assert_eq!(output.status.code(), Some(1));

  let text = stdout(&output);
  assert!(text.contains("src/app.js"), "{}", text);
  assert!(text.contains("no-todo:2"), "{}", text);
  assert!(text.contains("Unresolved TODO comment"), "{}", text);
  assert!(!text.contains("clean.ts"));
  assert!(!text.contains("node_modules"));

  Ok(())
}

#[test]
fn test_analyze_json_output() -> Result<()> {
  let repo = TestRepo::with_config("plugins:\n  - path: max-line-length\n    options: { max: 5 }\n")?;
  repo.write_file("a.js", "ok\ntoo long\n")?;

  let output = run_gitai(&repo.path, &["analyze", "--json"])?;
  assert_eq!(output.status.code(), Some(1));

  let findings: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  let findings = findings.as_array().expect("array");
  assert_eq!(findings.len(), 1);
  assert_eq!(findings[0]["plugin"], "max-line-length");
  assert_eq!(findings[0]["line"], 2);
  assert_eq!(findings[0]["severity"], "warning");
  assert!(findings[0]["file"].as_str().unwrap().ends_with("a.js"));

  Ok(())
}

#[test]
fn test_analyze_clean_repo_succeeds() -> Result<()> {
  let repo = TestRepo::with_config("plugins: [no-todo, trailing-whitespace]\n")?;
  repo.write_file("index.js", "console.log('hi');\n")?;

  let output = run_gitai_ok(&repo.path, &["analyze"])?;
  assert!(stdout(&output).contains("No findings"));

  // Missing target yields no files and no findings
  run_gitai_ok(&repo.path, &["analyze", "does/not/exist"])?;

  Ok(())
}

#[test]
fn test_analyze_single_file_target() -> Result<()> {
  let repo = TestRepo::with_config("plugins: [no-todo]\n")?;
  repo.write_file("notes.md", "FIXME\n")?;
  repo.write_file("a.js", "// TODO\n")?;

  let output = run_gitai(&repo.path, &["analyze", "notes.md"])?;
  assert_eq!(output.status.code(), Some(1));
  let text = stdout(&output);
  assert!(text.contains("notes.md"));
  assert!(!text.contains("a.js"));

  Ok(())
}

#[test]
fn test_analyze_without_config_hints_init() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_gitai(&repo.path, &["analyze"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("gitai init"));

  Ok(())
}

#[test]
fn test_analyze_invalid_plugin_entry() -> Result<()> {
  let repo = TestRepo::with_config("plugins:\n  - no-todo\n  - options: { max: 1 }\n")?;
  repo.write_file("a.js", "// TODO\n")?;

  let output = run_gitai(&repo.path, &["analyze"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid plugin entry"));
  // Nothing was analyzed
  assert!(stdout(&output).is_empty());

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_analyze_with_executable_plugin() -> Result<()> {
  let repo = TestRepo::with_config("plugins:\n  - path: ./rules/no-semi.sh\n    options: { strict: true }\n")?;
  repo.write_script(
    "rules/no-semi.sh",
    r#"case "$1" in
  capabilities) echo '["analyze"]' ;;
  analyze) cat > /dev/null; echo '[{"line": 1, "severity": "error", "message": "semicolon"}]' ;;
esac
"#,
  )?;
  repo.write_file("a.js", "let a = 1;\n")?;

  let output = run_gitai(&repo.path, &["analyze"])?;
  assert_eq!(output.status.code(), Some(1));
  let text = stdout(&output);
  // Path references are displayed by file stem
  assert!(text.contains("no-semi:1"), "{}", text);
  assert!(text.contains("semicolon"));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_failing_plugin_exits_with_plugin_code() -> Result<()> {
  let repo = TestRepo::with_config("plugins: [./rules/crash.sh]\n")?;
  repo.write_script(
    "rules/crash.sh",
    r#"case "$1" in
  capabilities) echo '["analyze"]' ;;
  *) echo 'segfault in rule' >&2; exit 1 ;;
esac
"#,
  )?;
  repo.write_file("a.js", "x\n")?;

  let output = run_gitai(&repo.path, &["analyze"])?;
  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains("./rules/crash.sh"), "{}", err);
  assert!(err.contains("segfault in rule"), "{}", err);

  Ok(())
}
