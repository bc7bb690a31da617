//! cmdtree - a command tree framework for CLIs
//!
//! Commands form a tree: each node owns its flags and children and may run
//! business logic, render help or produce shell completion candidates. A
//! single recursive dispatch resolves the command line against the tree.

// Public modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod i18n;

// Re-export commonly used types
pub use error::{CliError, Exit, Result};

/// Current version of cmdtree
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
