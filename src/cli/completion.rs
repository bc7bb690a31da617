//! Shell completion descriptor
//!
//! Bash invokes a `complete -C` helper with the command line in `COMP_LINE`
//! and the cursor offset in `COMP_POINT`. The descriptor keeps the words
//! before the cursor and the partial word under it.

use std::env;

pub const COMP_LINE_ENV: &str = "COMP_LINE";
pub const COMP_POINT_ENV: &str = "COMP_POINT";

/// Completion request for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    args: Vec<String>,
    current: String,
}

impl Completion {
    /// Build from completed words (without the program name) and the word
    /// being completed
    pub fn new(args: Vec<String>, current: impl Into<String>) -> Self {
        Completion {
            args,
            current: current.into(),
        }
    }

    /// Build from a full command line and a cursor byte offset
    pub fn from_line(line: &str, point: usize) -> Self {
        let before = line.get(..point).unwrap_or(line);
        let mut words: Vec<String> = before.split_whitespace().map(String::from).collect();

        // the first word is the program itself
        let mut args = if words.is_empty() {
            words
        } else {
            words.split_off(1)
        };

        let current = if before.ends_with(char::is_whitespace) {
            String::new()
        } else {
            args.pop().unwrap_or_default()
        };

        Completion { args, current }
    }

    /// Read `COMP_LINE`/`COMP_POINT`; `None` outside of completion
    pub fn from_env() -> Option<Self> {
        let line = env::var(COMP_LINE_ENV).ok()?;
        let point = env::var(COMP_POINT_ENV)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(line.len());
        Some(Self::from_line(&line, point))
    }

    /// Words already completed, program name excluded
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The partial word under the cursor
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Index of the word under the cursor among the arguments
    pub fn position(&self) -> usize {
        self.args.len()
    }
}
