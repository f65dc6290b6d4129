//! Compiled-in plugin table
//!
//! Every `PluginRegistry` starts out with these modules registered under their identifiers.

use super::rules::{max_line_length, no_todo, whitespace};
use super::tools::{eslint, prettier};
use super::trait_def::PluginModule;

/// A plugin shipped with gitai
pub struct BuiltinPlugin {
  /// Identifier used in configuration (kebab-case)
  pub id: &'static str,
  /// Human-readable description
  pub description: &'static str,
  load: fn() -> PluginModule,
}

impl BuiltinPlugin {
  /// Instantiate the plugin's module
  pub fn load(&self) -> PluginModule {
    (self.load)()
  }
}

/// All built-in plugins
pub const BUILTINS: &[BuiltinPlugin] = &[
  BuiltinPlugin {
    id: "eslint",
    description: "Lints each file with ESLint",
    load: eslint::analyzer_module,
  },
  BuiltinPlugin {
    id: "eslint-fix",
    description: "Applies ESLint autofixes",
    load: eslint::fix_module,
  },
  BuiltinPlugin {
    id: "prettier",
    description: "Formats files with Prettier",
    load: prettier::module,
  },
  BuiltinPlugin {
    id: "no-todo",
    description: "Flags TODO and FIXME markers",
    load: no_todo::module,
  },
  BuiltinPlugin {
    id: "max-line-length",
    description: "Flags lines longer than a limit",
    load: max_line_length::module,
  },
  BuiltinPlugin {
    id: "trailing-whitespace",
    description: "Reports or strips trailing whitespace",
    load: whitespace::trailing_whitespace_module,
  },
  BuiltinPlugin {
    id: "final-newline",
    description: "Ensures files end with exactly one newline",
    load: whitespace::final_newline_module,
  },
];
