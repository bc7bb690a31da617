//! Ordered collection of flags visible to one command

use crate::cli::flag::{AssignedMode, Flag};
use crate::error::{CliError, Result};

/// Flags of a command, in declaration order
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag definition.
    ///
    /// # Panics
    ///
    /// Panics when the name, an alias or the shorthand of `flag` is already
    /// used by another flag of this set. Flag sets are built once at startup,
    /// so a conflict is a programming error.
    pub fn add(&mut self, flag: Flag) {
        if let Some(existing) = self.conflicting(&flag) {
            panic!(
                "flag --{} conflicts with already declared flag --{}",
                flag.name, existing.name
            );
        }
        self.flags.push(flag);
    }

    fn conflicting(&self, flag: &Flag) -> Option<&Flag> {
        self.flags.iter().find(|f| {
            f.matches_name(&flag.name)
                || flag.aliases.iter().any(|a| f.matches_name(a))
                || (flag.shorthand.is_some() && f.shorthand == flag.shorthand)
        })
    }

    /// All flags in declaration order
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Get a flag by canonical name
    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.name == name)
    }

    /// Get a flag by name or alias
    pub fn find(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.matches_name(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Flag> {
        self.flags.iter_mut().find(|f| f.matches_name(name))
    }

    /// Get a flag by its single-character shorthand
    pub fn find_by_shorthand(&self, c: char) -> Option<&Flag> {
        self.flags.iter().find(|f| f.shorthand == Some(c))
    }

    pub fn find_by_shorthand_mut(&mut self, c: char) -> Option<&mut Flag> {
        self.flags.iter_mut().find(|f| f.shorthand == Some(c))
    }

    /// Whether the flag with this canonical name was given on the command line
    pub fn is_assigned(&self, name: &str) -> bool {
        self.get(name).is_some_and(Flag::is_assigned)
    }

    /// Value of a flag by canonical name (assigned value or default)
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Flag::value)
    }

    /// Names of flags that are not hidden, in declaration order
    pub fn visible_names(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|f| !f.hidden)
            .map(|f| f.name.as_str())
    }

    /// `--name` for every visible flag starting with the word being completed
    pub(crate) fn complete_names(&self, current: &str) -> Vec<String> {
        self.visible_names()
            .map(|name| format!("--{name}"))
            .filter(|flag| flag.starts_with(current))
            .collect()
    }

    /// Report the first required flag that was not assigned
    pub fn validate(&self) -> Result<()> {
        match self.flags.iter().find(|f| f.required && !f.is_assigned()) {
            Some(flag) => Err(CliError::MissingFlag(flag.name.clone())),
            None => Ok(()),
        }
    }

    /// Flag set for a command entered below the owner of `parent`.
    ///
    /// Starts from unassigned copies of `self` and appends the persistent
    /// flags of `parent` (keeping whatever was already assigned to them)
    /// unless `self` declares a flag with the same name.
    pub fn merged_with(&self, parent: &FlagSet) -> FlagSet {
        let mut merged = FlagSet {
            flags: self.flags.iter().map(Flag::reset).collect(),
        };
        for flag in parent.flags.iter().filter(|f| f.persistent) {
            if merged.get(&flag.name).is_none() {
                merged.flags.push(flag.clone());
            }
        }
        merged
    }

    /// Record an occurrence of a flag nobody declared
    pub fn record_unknown(&mut self, name: &str, value: Option<String>) {
        match self.find_mut(name) {
            Some(flag) => flag.record(value),
            None => {
                let mut flag = Flag::new(name).mode(AssignedMode::Repeatable);
                flag.record(value);
                self.flags.push(flag);
            }
        }
    }
}
