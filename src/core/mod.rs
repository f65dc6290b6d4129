//! Core building blocks shared by the engine and the commands
//!
//! - **config**: Repository configuration (.gitai.yml) discovery, parsing and validation
//! - **context**: Repository context built once in main.rs
//! - **error**: Error taxonomy with contextual help messages and exit codes

pub mod config;
pub mod context;
pub mod error;
