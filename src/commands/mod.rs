//! CLI commands for gitai
//!
//! - **init**: write a default `.gitai.yml`
//! - **analyze**: run analyzer plugins and report findings
//! - **fmt**: run formatter plugins over the target
//! - **plugins**: list built-in plugins
//!
//! All commands that need configuration take `&RepoContext`.

pub mod analyze;
pub mod fmt;
pub mod init;
pub mod plugins;

pub use analyze::run_analyze;
pub use fmt::run_fmt;
pub use init::run_init;
pub use plugins::run_plugins;
