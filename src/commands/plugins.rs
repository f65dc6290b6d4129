use crate::core::error::GitaiResult;
use crate::plugins::builtin::BUILTINS;

/// List the built-in plugins and the capabilities each exposes
pub fn run_plugins() -> GitaiResult<()> {
  println!("🔌 Built-in plugins:");
  println!();

  for plugin in BUILTINS {
    let capabilities: Vec<_> = plugin.load().capabilities().iter().map(|c| c.name()).collect();
    println!("   {:<20} {:<16} {}", plugin.id, capabilities.join(", "), plugin.description);
  }

  println!();
  println!("Plugins whose reference starts with `.` are executables run from the repository root.");
  Ok(())
}
