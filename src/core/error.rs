//! Error types for gitai with contextual messages and exit codes
//!
//! Every failure the orchestration engine can produce is represented here and
//! propagated to the command layer unchanged. Nothing is recovered internally:
//! a run either completes with a full result or fails with an attributable error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for gitai
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, plugin references, missing files)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// A plugin failed while running
  Plugin = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for gitai
#[derive(Debug)]
pub enum GitaiError {
  /// Configuration errors
  Config(ConfigError),

  /// Plugin loading and invocation errors
  Plugin(PluginError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl GitaiError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    GitaiError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    GitaiError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      GitaiError::Message { message, context, help } => GitaiError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      // Stays an I/O error so the exit code still reports a system failure
      GitaiError::Io(err) => GitaiError::Io(io::Error::new(err.kind(), format!("{}: {}", ctx_str, err))),
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      GitaiError::Config(_) => ExitCode::User,
      GitaiError::Plugin(PluginError::Invocation { .. }) => ExitCode::Plugin,
      GitaiError::Plugin(_) => ExitCode::User,
      GitaiError::Io(_) => ExitCode::System,
      GitaiError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      GitaiError::Config(e) => e.help_message(),
      GitaiError::Plugin(e) => e.help_message(),
      GitaiError::Message { help, .. } => help.clone(),
      GitaiError::Io(_) => None,
    }
  }
}

impl fmt::Display for GitaiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitaiError::Config(e) => write!(f, "{}", e),
      GitaiError::Plugin(e) => write!(f, "{}", e),
      GitaiError::Io(e) => write!(f, "I/O error: {}", e),
      GitaiError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for GitaiError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      GitaiError::Io(e) => Some(e),
      GitaiError::Plugin(PluginError::Invocation { source, .. }) => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for GitaiError {
  fn from(err: io::Error) -> Self {
    GitaiError::Io(err)
  }
}

impl From<String> for GitaiError {
  fn from(msg: String) -> Self {
    GitaiError::message(msg)
  }
}

impl From<&str> for GitaiError {
  fn from(msg: &str) -> Self {
    GitaiError::message(msg)
  }
}

impl From<ConfigError> for GitaiError {
  fn from(err: ConfigError) -> Self {
    GitaiError::Config(err)
  }
}

impl From<PluginError> for GitaiError {
  fn from(err: PluginError) -> Self {
    GitaiError::Plugin(err)
  }
}

impl From<toml_edit::de::Error> for GitaiError {
  fn from(err: toml_edit::de::Error) -> Self {
    GitaiError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_yaml::Error> for GitaiError {
  fn from(err: serde_yaml::Error) -> Self {
    GitaiError::message(format!("YAML error: {}", err))
  }
}

impl From<serde_json::Error> for GitaiError {
  fn from(err: serde_json::Error) -> Self {
    GitaiError::message(format!("JSON error: {}", err))
  }
}

impl From<glob::PatternError> for GitaiError {
  fn from(err: glob::PatternError) -> Self {
    GitaiError::message(format!("Invalid glob pattern: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// No configuration document in the repository root
  NotFound { root: PathBuf },

  /// Configuration declares a schema version this build cannot read
  UnsupportedVersion { version: u32 },

  /// `gitai init` refused to overwrite an existing document
  AlreadyExists { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `gitai init` to create a .gitai.yml configuration file.".to_string()),
      ConfigError::UnsupportedVersion { .. } => Some("Set `version: 1` in your configuration.".to_string()),
      ConfigError::AlreadyExists { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { root } => {
        write!(
          f,
          "No gitai configuration found.\nExpected file: {}/.gitai.yml",
          root.display()
        )
      }
      ConfigError::UnsupportedVersion { version } => {
        write!(f, "Unsupported configuration version: {}", version)
      }
      ConfigError::AlreadyExists { path } => {
        write!(f, "{} already exists!", path.display())
      }
    }
  }
}

/// Plugin loading and invocation errors
#[derive(Debug)]
pub enum PluginError {
  /// Entry is neither a string nor a `{ path, options }` record with a non-empty path
  InvalidReference { entry: String },

  /// Module resolved but does not expose the requested capability
  MissingCapability { plugin: String, capability: &'static str },

  /// Module could not be located or loaded
  Resolution { plugin: String, reason: String },

  /// A loaded plugin failed during `analyze` or `format`
  Invocation { plugin: String, source: anyhow::Error },
}

impl PluginError {
  fn help_message(&self) -> Option<String> {
    match self {
      PluginError::InvalidReference { .. } => Some(
        "Plugin entries must be a string or a mapping like `{ path: ./my-plugin, options: {} }`.".to_string(),
      ),
      PluginError::MissingCapability { capability, .. } => Some(format!(
        "List this plugin under the section matching its capability, or make it expose `{}`.",
        capability
      )),
      PluginError::Resolution { plugin, .. } => {
        if plugin.starts_with('.') {
          Some("Relative plugins are resolved from the repository root and must be executable.".to_string())
        } else {
          Some("Run `gitai plugins` to list the built-in plugins.".to_string())
        }
      }
      PluginError::Invocation { .. } => None,
    }
  }
}

impl fmt::Display for PluginError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PluginError::InvalidReference { entry } => {
        write!(f, "Invalid plugin entry: {}", entry)
      }
      PluginError::MissingCapability { plugin, capability } => {
        write!(f, "{} has no {}() capability", plugin, capability)
      }
      PluginError::Resolution { plugin, reason } => {
        write!(f, "Cannot load plugin {}: {}", plugin, reason)
      }
      PluginError::Invocation { plugin, source } => {
        write!(f, "Plugin {} failed: {:#}", plugin, source)
      }
    }
  }
}

/// Result type alias for gitai
pub type GitaiResult<T> = Result<T, GitaiError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> GitaiResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> GitaiResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<GitaiError>,
{
  fn context(self, ctx: impl Into<String>) -> GitaiResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> GitaiResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &GitaiError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
