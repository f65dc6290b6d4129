//! Analyze command implementation

use crate::core::context::RepoContext;
use crate::core::error::GitaiResult;
use crate::engine::Engine;
use crate::engine::model::{Finding, count_by_severity};
use crate::ui::progress::FileProgress;
use crate::utils::{display_path, plugin_display_name};
use std::path::Path;

/// Run the analyze command
///
/// Exits with status 1 when any finding is reported.
pub fn run_analyze(ctx: &RepoContext, target: &Path, json: bool, progress: bool) -> GitaiResult<()> {
  let config = ctx.require_config()?;
  let engine = Engine::new(ctx.root(), config);

  let findings = if progress && !json {
    let mut bar = FileProgress::new("Analyzing");
    engine.analyze_with_observer(target, &mut bar)?
  } else {
    engine.analyze(target)?
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&findings)?);
  } else {
    print_findings(&findings, ctx.root());
  }

  if !findings.is_empty() {
    std::process::exit(1);
  }

  Ok(())
}

fn print_findings(findings: &[Finding], root: &Path) {
  if findings.is_empty() {
    println!("✅ No findings");
    return;
  }

  // Findings arrive grouped by file already
  let mut current: Option<&Path> = None;
  for finding in findings {
    if current != Some(finding.file()) {
      if current.is_some() {
        println!();
      }
      println!("📄 {}", display_path(finding.file(), root));
      current = Some(finding.file());
    }

    let plugin = plugin_display_name(finding.plugin());
    let location = match finding.line() {
      Some(line) => format!("{}:{}", plugin, line),
      None => plugin.to_string(),
    };
    println!("   {:<7} {}  {}", finding.severity().to_string(), location, finding.message());
  }

  let (errors, warnings, info) = count_by_severity(findings);
  println!();
  println!(
    "⚠️  {} finding(s): {} error(s), {} warning(s), {} info",
    findings.len(),
    errors,
    warnings,
    info
  );
}
