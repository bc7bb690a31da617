//! Command tree framework
//!
//! This module handles command definitions, argument parsing, dispatch,
//! help generation and shell completion.

pub mod command;
pub mod completion;
pub mod context;
pub mod flag;
pub mod flag_set;
pub mod handler;
pub mod help;
pub mod metadata;
pub mod parser;
pub mod suggester;

// Re-export main types
pub use command::Command;
pub use completion::Completion;
pub use context::Context;
pub use flag::{AssignedMode, Flag};
pub use flag_set::FlagSet;
pub use handler::{Completable, DefaultHelp, HelpRenderable, Runnable};
pub use metadata::{FlagMetadata, Metadata};
pub use suggester::SuggestDistance;
