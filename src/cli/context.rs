//! Execution context for one invocation
//!
//! The context tracks all the state needed while a command line is resolved:
//! the path of commands entered so far, the flags visible at the current
//! level, the help and completion modes and the output sinks. It is passed by
//! `&mut` through the whole recursive dispatch.

use crate::cli::command::Command;
use crate::cli::completion::Completion;
use crate::cli::flag::{Flag, HELP_FLAG};
use crate::cli::flag_set::FlagSet;
use crate::i18n::Language;
use std::io::Write;
use tracing::debug;

/// Name of the flag that overrides the display language
pub const LANGUAGE_FLAG: &str = "language";

/// Execution context that tracks state during dispatch
pub struct Context<'a> {
    stdout: &'a mut dyn Write,
    stderr: &'a mut dyn Write,

    /// Flags visible at the current level (persistent ancestors + own)
    flags: FlagSet,

    /// Flags nobody declared, kept while the current command accepts them
    unknown_flags: Option<FlagSet>,

    /// Names of the commands entered so far, root first
    path: Vec<String>,

    /// Sticky once set
    help: bool,

    completion: Option<Completion>,

    language: Language,

    /// Colour the error prefix and tips on the error stream
    color: bool,
}

impl<'a> Context<'a> {
    /// Create a context writing to the given sinks.
    ///
    /// The context starts with the persistent `--help` flag so every command
    /// accepts it.
    pub fn new(stdout: &'a mut dyn Write, stderr: &'a mut dyn Write) -> Self {
        let mut flags = FlagSet::new();
        flags.add(Flag::help());

        Context {
            stdout,
            stderr,
            flags,
            unknown_flags: None,
            path: Vec::new(),
            help: false,
            completion: None,
            language: Language::default(),
            color: false,
        }
    }

    /// Switch to completion mode
    pub fn with_completion(mut self, completion: Option<Completion>) -> Self {
        self.completion = completion;
        self
    }

    /// Set the display language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Colour error output, for an error sink that is a terminal
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn stdout(&mut self) -> &mut (dyn Write + 'a) {
        &mut *self.stdout
    }

    pub fn stderr(&mut self) -> &mut (dyn Write + 'a) {
        &mut *self.stderr
    }

    /// Flags visible at the current level
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut FlagSet {
        &mut self.flags
    }

    /// Unknown flags collected so far, if the current command accepts them
    pub fn unknown_flags(&self) -> Option<&FlagSet> {
        self.unknown_flags.as_ref()
    }

    pub fn unknown_flags_mut(&mut self) -> Option<&mut FlagSet> {
        self.unknown_flags.as_mut()
    }

    /// Descend into `cmd`: record it on the path and switch to its flags
    pub fn enter_command(&mut self, cmd: &Command) {
        self.path.push(cmd.name().to_string());
        self.flags = cmd.flags().merged_with(&self.flags);
        self.unknown_flags = if cmd.accepts_unknown_flags() {
            Some(self.unknown_flags.take().unwrap_or_default())
        } else {
            None
        };
        debug!(path = %self.command_path(), flags = self.flags.len(), "entered command");
    }

    /// Names of the commands entered so far, root first
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Space-joined command path, e.g. `cmdtree config show`
    pub fn command_path(&self) -> String {
        self.path.join(" ")
    }

    /// Whether help output was requested
    pub fn is_help(&self) -> bool {
        self.help
    }

    pub fn set_help(&mut self) {
        self.help = true;
    }

    /// Whether `--help`/`-h` was given
    pub(crate) fn help_flag_assigned(&self) -> bool {
        self.flags.is_assigned(HELP_FLAG)
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn is_completing(&self) -> bool {
        self.completion.is_some()
    }

    /// Display language: a valid `--language` value wins over the configured one
    pub fn language(&self) -> Language {
        self.flags
            .get(LANGUAGE_FLAG)
            .filter(|f| f.is_assigned())
            .and_then(|f| f.value())
            .and_then(Language::parse)
            .unwrap_or(self.language)
    }
}
