//! Plugin registry: turn configured references into loaded, validated plugin handles
//!
//! Loading is all-or-nothing. Every entry is normalized, resolved and checked
//! for the requested capability before any handle is returned, and no
//! capability is invoked during a load, so a bad entry anywhere in the list
//! fails the load without side effects from the good ones.

use crate::core::error::{GitaiResult, PluginError};
use crate::plugins::process::ProcessPlugin;
use crate::plugins::builtin::BUILTINS;
use crate::plugins::{Analyzer, Capability, Formatter, PluginModule, PluginOptions};
use crate::utils::{absolutize, is_relative_reference};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// A plugin entry from configuration
#[derive(Debug, Clone, PartialEq)]
pub enum PluginReference {
  /// `- no-todo`
  Bare(String),
  /// `- { path: ./rules/custom.sh, options: { ... } }`
  Configured { path: String, options: PluginOptions },
}

impl PluginReference {
  /// Normalize a raw configuration entry
  pub fn from_value(entry: &Value) -> Result<Self, PluginError> {
    let invalid = || PluginError::InvalidReference { entry: entry.to_string() };

    match entry {
      Value::String(path) if !path.is_empty() => Ok(PluginReference::Bare(path.clone())),
      Value::Object(record) => {
        let path = match record.get("path") {
          Some(Value::String(path)) if !path.is_empty() => path.clone(),
          _ => return Err(invalid()),
        };
        let options = match record.get("options") {
          None | Some(Value::Null) => PluginOptions::new(),
          Some(Value::Object(options)) => options.clone(),
          Some(_) => return Err(invalid()),
        };
        Ok(PluginReference::Configured { path, options })
      }
      _ => Err(invalid()),
    }
  }

  pub fn into_parts(self) -> (String, PluginOptions) {
    match self {
      PluginReference::Bare(path) => (path, PluginOptions::new()),
      PluginReference::Configured { path, options } => (path, options),
    }
  }
}

/// A loaded plugin bound to one capability
pub struct PluginHandle<C: ?Sized> {
  /// The reference as written in configuration, used for attribution
  pub name: String,
  pub capability: Arc<C>,
  pub options: PluginOptions,
}

impl<C: ?Sized> fmt::Debug for PluginHandle<C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PluginHandle")
      .field("name", &self.name)
      .field("options", &self.options)
      .finish()
  }
}

pub type AnalyzerHandle = PluginHandle<dyn Analyzer>;
pub type FormatterHandle = PluginHandle<dyn Formatter>;

/// Resolves plugin references to modules
///
/// Relative references load executables from disk; anything else is looked up
/// among the registered modules, which start out as the built-in table.
pub struct PluginRegistry {
  modules: HashMap<String, PluginModule>,
}

impl PluginRegistry {
  /// Registry seeded with every built-in plugin
  pub fn new() -> Self {
    let mut registry = Self { modules: HashMap::new() };
    for plugin in BUILTINS {
      registry.register(plugin.id, plugin.load());
    }
    registry
  }

  /// Register a module under an identifier, shadowing any built-in of the same name
  pub fn register(&mut self, id: impl Into<String>, module: PluginModule) {
    self.modules.insert(id.into(), module);
  }

  /// Load analyzer plugins
  pub fn load_analyzers(&self, entries: &[Value], root: &Path) -> GitaiResult<Vec<AnalyzerHandle>> {
    self.load(entries, root, Capability::Analyze, |m| m.analyze.clone())
  }

  /// Load formatter plugins
  pub fn load_formatters(&self, entries: &[Value], root: &Path) -> GitaiResult<Vec<FormatterHandle>> {
    self.load(entries, root, Capability::Format, |m| m.format.clone())
  }

  fn load<C: ?Sized>(
    &self,
    entries: &[Value],
    root: &Path,
    capability: Capability,
    select: impl Fn(&PluginModule) -> Option<Arc<C>>,
  ) -> GitaiResult<Vec<PluginHandle<C>>> {
    // Normalize every entry before resolving any of them
    let references = entries
      .iter()
      .map(PluginReference::from_value)
      .collect::<Result<Vec<_>, _>>()?;

    let mut handles = Vec::with_capacity(references.len());
    for reference in references {
      let (name, options) = reference.into_parts();
      let module = self.resolve_module(&name, root)?;
      let callable = select(&module).ok_or_else(|| PluginError::MissingCapability {
        plugin: name.clone(),
        capability: capability.name(),
      })?;

      tracing::debug!(plugin = %name, %capability, "loaded plugin");
      handles.push(PluginHandle {
        name,
        capability: callable,
        options,
      });
    }

    Ok(handles)
  }

  /// Resolve a reference to a module
  pub fn resolve_module(&self, reference: &str, root: &Path) -> Result<PluginModule, PluginError> {
    if is_relative_reference(reference) {
      let program = absolutize(root, Path::new(reference));
      if !program.is_file() {
        return Err(PluginError::Resolution {
          plugin: reference.to_string(),
          reason: format!("no file at {}", program.display()),
        });
      }
      return ProcessPlugin::new(program, root)
        .into_module()
        .map_err(|err| PluginError::Resolution {
          plugin: reference.to_string(),
          reason: format!("{:#}", err),
        });
    }

    self
      .modules
      .get(reference)
      .cloned()
      .ok_or_else(|| PluginError::Resolution {
        plugin: reference.to_string(),
        reason: "not a built-in or registered plugin".to_string(),
      })
  }
}

impl Default for PluginRegistry {
  fn default() -> Self {
    Self::new()
  }
}
