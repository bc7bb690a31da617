//! Flag definitions and their per-invocation values

use crate::error::{CliError, Result};
use crate::i18n::Text;
use tracing::trace;

/// Name of the built-in help flag
pub const HELP_FLAG: &str = "help";

/// How a flag takes values on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignedMode {
    /// Presence only: `--force`
    Boolean,
    /// Exactly one value: `--region cn-hangzhou` or `--region=cn-hangzhou`
    #[default]
    Single,
    /// Any number of `key=value` fields: `--meta a=1 b=2`
    Repeatable,
}

impl AssignedMode {
    /// Integer code used in exported metadata
    pub fn code(self) -> i32 {
        match self {
            AssignedMode::Boolean => -1,
            AssignedMode::Single => 1,
            AssignedMode::Repeatable => 9,
        }
    }
}

/// One field of a repeatable flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Text before the first `=`, `None` when the value has no `=`
    pub key: Option<String>,
    pub value: String,
}

impl Field {
    fn parse(raw: &str) -> Self {
        match raw.split_once('=') {
            Some((key, value)) => Field {
                key: Some(key.to_string()),
                value: value.to_string(),
            },
            None => Field {
                key: None,
                value: raw.to_string(),
            },
        }
    }
}

/// A flag definition plus the values assigned during one invocation
#[derive(Debug, Clone, Default)]
pub struct Flag {
    /// Canonical name, used as `--name`
    pub name: String,
    /// Single-character form, used as `-x`
    pub shorthand: Option<char>,
    pub aliases: Vec<String>,
    pub short: Option<Text>,
    pub long: Option<Text>,
    pub assigned_mode: AssignedMode,
    pub default_value: Option<String>,
    pub required: bool,
    /// Inherited by every descendant command
    pub persistent: bool,
    pub hidden: bool,
    /// Group heading in help output
    pub category: Option<String>,

    assigned: bool,
    values: Vec<String>,
}

impl Flag {
    pub fn new(name: impl Into<String>) -> Self {
        Flag {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The `--help`/`-h` flag every context starts with
    pub fn help() -> Self {
        Flag::new(HELP_FLAG)
            .shorthand('h')
            .mode(AssignedMode::Boolean)
            .persistent()
            .short(Text::new("print help", "打印帮助信息"))
    }

    pub fn shorthand(mut self, c: char) -> Self {
        self.shorthand = Some(c);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn mode(mut self, mode: AssignedMode) -> Self {
        self.assigned_mode = mode;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn short(mut self, text: Text) -> Self {
        self.short = Some(text);
        self
    }

    pub fn long(mut self, text: Text) -> Self {
        self.long = Some(text);
        self
    }

    /// Check whether `s` is the name or one of the aliases of this flag
    pub fn matches_name(&self, s: &str) -> bool {
        self.name == s || self.aliases.iter().any(|a| a == s)
    }

    /// Whether the flag was given on the command line
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// The assigned value, or the default when the flag was not given.
    ///
    /// For repeatable flags this is the first value.
    pub fn value(&self) -> Option<&str> {
        if self.assigned {
            self.values.first().map(String::as_str)
        } else {
            self.default_value.as_deref()
        }
    }

    /// Every raw value assigned so far
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Values of a repeatable flag split into `key=value` fields
    pub fn fields(&self) -> Vec<Field> {
        self.values.iter().map(|v| Field::parse(v)).collect()
    }

    /// Value of the first field with the given key
    pub fn field_value(&self, key: &str) -> Option<&str> {
        self.values.iter().find_map(|v| match v.split_once('=') {
            Some((k, value)) if k == key => Some(value),
            _ => None,
        })
    }

    /// Record one occurrence of the flag on the command line.
    ///
    /// `value` is `None` for a bare occurrence and `Some` for an inline or
    /// following value.
    pub fn assign(&mut self, value: Option<String>) -> Result<()> {
        match (self.assigned_mode, value) {
            (AssignedMode::Boolean, Some(_)) => {
                return Err(CliError::UnexpectedValue(self.name.clone()));
            }
            (AssignedMode::Boolean, None) => {}
            (AssignedMode::Single, _) if self.assigned => {
                return Err(CliError::DuplicateFlag(self.name.clone()));
            }
            (_, None) => {
                return Err(CliError::MissingValue(self.name.clone()));
            }
            (_, Some(value)) => self.values.push(value),
        }
        trace!(flag = %self.name, values = ?self.values, "flag assigned");
        self.assigned = true;
        Ok(())
    }

    /// Append a value to a flag that is already assigned (repeatable flags)
    pub(crate) fn push_value(&mut self, value: String) {
        self.values.push(value);
    }

    /// Record an occurrence without any mode checks (unknown flags)
    pub(crate) fn record(&mut self, value: Option<String>) {
        self.assigned = true;
        self.values.extend(value);
    }

    /// Copy of the definition with no assigned values
    pub fn reset(&self) -> Self {
        Flag {
            assigned: false,
            values: Vec::new(),
            ..self.clone()
        }
    }
}
