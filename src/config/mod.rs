//! Configuration loading and validation
//!
//! This module reads the YAML configuration file, resolves option aliases
//! and validates option values.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
