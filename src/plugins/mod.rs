//! Plugin capabilities and the plugins that ship with gitai
//!
//! All plugins implement [`Analyzer`] and/or [`Formatter`], making it easy to
//! add new ones without modifying the engine.
//!
//! # Sources
//!
//! - **builtin**: compiled-in plugins selected by identifier (`no-todo`, `prettier`, ...)
//! - **process**: executables referenced by a relative path, speaking a JSON protocol
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::plugins::builtin::BUILTINS;
//!
//! let no_todo = BUILTINS.iter().find(|p| p.id == "no-todo").unwrap();
//! assert!(no_todo.load().analyze.is_some());
//! ```

pub mod builtin;
pub mod process;
mod rules;
mod tools;
mod trait_def;

pub use trait_def::{
  AnalyzeInvocation, Analyzer, Capability, FormatInvocation, Formatter, PluginModule, PluginOptions,
};
