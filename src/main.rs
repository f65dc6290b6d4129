mod commands;
mod core;
mod engine;
mod plugins;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use core::error::{GitaiError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Run analyzer and formatter plugins across a repository
#[derive(Parser)]
#[command(name = "gitai")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Enable debug logging (overridden by GITAI_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Write a default .gitai.yml to the current directory
  Init,

  /// Run the configured analyzer plugins and report findings
  Analyze {
    /// File or directory to analyze
    #[arg(default_value = ".")]
    target: PathBuf,
    /// Output findings in JSON format
    #[arg(long)]
    json: bool,
    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,
  },

  /// Run the configured formatter plugins, rewriting files in place
  Fmt {
    /// File or directory to format (default: formatDir, or the current directory)
    #[arg(default_value = ".")]
    target: PathBuf,
    /// Output modified files in JSON format
    #[arg(long)]
    json: bool,
  },

  /// List built-in plugins
  Plugins,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let _ = tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_env("GITAI_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level)),
    )
    .with_writer(std::io::stderr)
    .try_init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(GitaiError::from(e).context("Failed to get current directory")),
  };

  // Configuration is loaded once here; commands that need it call `require_config`
  let ctx = core::context::RepoContext::build(&root);

  let result = match cli.command {
    Commands::Init => commands::run_init(&ctx),
    Commands::Analyze { target, json, progress } => commands::run_analyze(&ctx, &target, json, progress),
    Commands::Fmt { target, json } => commands::run_fmt(&ctx, &target, json),
    Commands::Plugins => commands::run_plugins(),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: GitaiError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
