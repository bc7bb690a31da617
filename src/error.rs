//! Error types for cmdtree

use crate::i18n::Text;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for dispatcher and handler operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Main error type for cmdtree
///
/// Every failure inside the command tree (resolution, flag parsing, flag
/// validation and whatever a handler reports) travels up the recursion as a
/// `CliError` and is classified once by [`CliError::exit`].
#[derive(Error, Debug)]
pub enum CliError {
    /// A token did not match any sub-command of a command without a run handler
    #[error("'{name}' is not a valid command")]
    InvalidCommand {
        name: String,
        suggestions: Vec<String>,
    },

    /// A flag-shaped token did not match any flag of the current command
    #[error("invalid flag {flag}")]
    InvalidFlag {
        flag: String,
        suggestions: Vec<String>,
    },

    #[error("flag --{0} requires a value")]
    MissingValue(String),

    #[error("flag --{0} does not take a value")]
    UnexpectedValue(String),

    #[error("flag --{0} is duplicated")]
    DuplicateFlag(String),

    /// A required flag was not assigned
    #[error("missing required flag --{0}")]
    MissingFlag(String),

    /// Error reported by a handler, optionally carrying suggestions or a tip
    #[error("{message}")]
    Handler {
        message: String,
        suggestions: Option<Vec<String>>,
        tip: Option<Text>,
    },

    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O errors, usually from writing to an output sink
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Anything else a handler propagated with `?`
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Read config file error: {}: {error}", path.display())]
    Read { path: PathBuf, error: String },

    #[error("Read config file error: {}: {error}", path.display())]
    Parse { path: PathBuf, error: String },

    #[error("Read config file error: {}: section '{section}' not found", path.display())]
    MissingSection { path: PathBuf, section: String },

    #[error("error value of option \"{name}\", the value is: {value} in config file, which needs int64 type")]
    NotAnInteger { name: String, value: String },

    #[error("error value of option \"{name}\", the value is: {value} in config file, which is not anyone of {allowed}")]
    NotAlternative {
        name: String,
        value: String,
        allowed: String,
    },

    #[error("option \"{0}\" must be a plain value")]
    NotPlain(String),
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// What an error offers the user besides its message
#[derive(Debug, PartialEq)]
pub enum Remedy<'a> {
    /// "Did you mean" candidates
    Suggestions(&'a [String]),
    /// A hint on how to fix the problem
    Tip(Text),
    None,
}

/// Terminal outcome of a top-level invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
    Suggestion,
    Tip,
}

impl Exit {
    /// Process exit code
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::Failure => 1,
            Exit::Suggestion => 2,
            Exit::Tip => 3,
        }
    }
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit.code())
    }
}

impl CliError {
    /// Build a handler error with only a message
    pub fn handler(message: impl Into<String>) -> Self {
        CliError::Handler {
            message: message.into(),
            suggestions: None,
            tip: None,
        }
    }

    /// Build a handler error carrying suggestions
    pub fn with_suggestions(message: impl Into<String>, suggestions: Vec<String>) -> Self {
        CliError::Handler {
            message: message.into(),
            suggestions: Some(suggestions),
            tip: None,
        }
    }

    /// Build a handler error carrying a tip
    pub fn with_tip(message: impl Into<String>, tip: Text) -> Self {
        CliError::Handler {
            message: message.into(),
            suggestions: None,
            tip: Some(tip),
        }
    }

    /// Suggestions carried by this error, if it carries any at all.
    ///
    /// `Some(&[])` still counts as a suggestion-carrying error.
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            CliError::InvalidCommand { suggestions, .. }
            | CliError::InvalidFlag { suggestions, .. } => Some(suggestions),
            CliError::Handler {
                suggestions: Some(suggestions),
                ..
            } => Some(suggestions),
            _ => None,
        }
    }

    /// Tip carried by this error
    pub fn tip(&self) -> Option<Text> {
        match self {
            CliError::Handler { tip, .. } => tip.clone(),
            CliError::Config(e) => e.tip(),
            _ => None,
        }
    }

    /// Classify the error. Suggestions take precedence over a tip.
    pub fn remedy(&self) -> Remedy<'_> {
        if let Some(suggestions) = self.suggestions() {
            return Remedy::Suggestions(suggestions);
        }
        match self.tip() {
            Some(tip) => Remedy::Tip(tip),
            None => Remedy::None,
        }
    }

    /// Exit status for this error
    pub fn exit(&self) -> Exit {
        match self.remedy() {
            Remedy::Suggestions(_) => Exit::Suggestion,
            Remedy::Tip(_) => Exit::Tip,
            Remedy::None => Exit::Failure,
        }
    }
}

impl ConfigError {
    /// Tip shown for errors that stop the config file from being read at all
    pub fn tip(&self) -> Option<Text> {
        match self {
            ConfigError::Read { .. }
            | ConfigError::Parse { .. }
            | ConfigError::MissingSection { .. } => Some(Text::new(
                "Please try \"cmdtree config --help\" to set up the configuration, or use the \"--config-file\" option.",
                "请尝试 \"cmdtree config --help\" 进行配置，或使用 \"--config-file\" 选项指定配置文件。",
            )),
            _ => None,
        }
    }
}
