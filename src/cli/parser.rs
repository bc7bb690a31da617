//! Argument parsing
//!
//! The parser walks a fixed token slice with an explicit cursor. Flag tokens
//! are resolved against the context's flag set and assigned as they are met;
//! everything else is handed back to the caller as a positional argument.

use crate::cli::context::Context;
use crate::cli::flag::AssignedMode;
use crate::cli::suggester::{suggest, SuggestDistance};
use crate::error::{CliError, Result};
use tracing::trace;

/// Ends flag parsing: every later token is positional
pub const END_OF_FLAGS: &str = "--";

/// Whether a token looks like a flag (`-x`, `--name`, `--name=value`)
pub fn is_flag_shaped(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// How a flag token refers to its flag
enum FlagRef<'t> {
    Long(&'t str),
    Short(char),
}

impl FlagRef<'_> {
    fn name(&self) -> String {
        match self {
            FlagRef::Long(name) => name.to_string(),
            FlagRef::Short(c) => c.to_string(),
        }
    }
}

/// Stateful reader over one level's tokens
pub struct Parser<'a> {
    args: &'a [String],
    current: usize,
    flags_ended: bool,
}

impl<'a> Parser<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self::with_flags_ended(args, false)
    }

    /// Start a parser that may already be past a `--` read at an outer level
    pub fn with_flags_ended(args: &'a [String], flags_ended: bool) -> Self {
        Parser {
            args,
            current: 0,
            flags_ended,
        }
    }

    /// Whether `--` has been read
    pub fn flags_ended(&self) -> bool {
        self.flags_ended
    }

    /// Cursor position
    pub fn current(&self) -> usize {
        self.current
    }

    /// Tokens not consumed yet
    pub fn remains(&self) -> &'a [String] {
        let args = self.args;
        &args[self.current.min(args.len())..]
    }

    /// Read the next non-flag token, assigning every flag stepped over.
    ///
    /// Returns `None` once the stream is exhausted.
    pub fn read_next_arg(&mut self, ctx: &mut Context<'_>) -> Result<Option<String>> {
        let args = self.args;
        while let Some(token) = args.get(self.current) {
            self.current += 1;

            if self.flags_ended || !is_flag_shaped(token) {
                return Ok(Some(token.clone()));
            }
            if token == END_OF_FLAGS {
                self.flags_ended = true;
                continue;
            }
            self.read_flag(ctx, token)?;
        }
        Ok(None)
    }

    /// Consume the rest of the stream and return the positional arguments
    pub fn read_all(&mut self, ctx: &mut Context<'_>) -> Result<Vec<String>> {
        let mut positional = Vec::new();
        while let Some(arg) = self.read_next_arg(ctx)? {
            positional.push(arg);
        }
        Ok(positional)
    }

    fn read_flag(&mut self, ctx: &mut Context<'_>, token: &str) -> Result<()> {
        let (prefix, inline) = match token.split_once('=') {
            Some((prefix, value)) => (prefix, Some(value.to_string())),
            None => (token, None),
        };
        let flag_ref = match prefix.strip_prefix("--") {
            Some(name) => FlagRef::Long(name),
            None => {
                let rest = &prefix[1..];
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => FlagRef::Short(c),
                    _ => FlagRef::Long(rest),
                }
            }
        };
        trace!(token, "reading flag");

        let found = match &flag_ref {
            FlagRef::Long(name) => ctx.flags().find(name),
            FlagRef::Short(c) => ctx.flags().find_by_shorthand(*c),
        }
        .map(|f| (f.name.clone(), f.assigned_mode));

        let Some((name, mode)) = found else {
            return self.read_unknown_flag(ctx, prefix, &flag_ref, inline);
        };

        let args = self.args;
        let mut values = Vec::new();
        values.extend(inline);
        match mode {
            AssignedMode::Boolean => {}
            AssignedMode::Single => {
                if values.is_empty() {
                    if let Some(next) = args.get(self.current) {
                        self.current += 1;
                        values.push(next.clone());
                    }
                }
            }
            AssignedMode::Repeatable => {
                while let Some(next) = args.get(self.current) {
                    if is_flag_shaped(next) {
                        break;
                    }
                    self.current += 1;
                    values.push(next.clone());
                }
            }
        }

        let flag = ctx
            .flags_mut()
            .find_mut(&name)
            .ok_or_else(|| CliError::InvalidFlag {
                flag: prefix.to_string(),
                suggestions: Vec::new(),
            })?;
        let mut values = values.into_iter();
        flag.assign(values.next())?;
        for value in values {
            flag.push_value(value);
        }
        Ok(())
    }

    fn read_unknown_flag(
        &mut self,
        ctx: &mut Context<'_>,
        prefix: &str,
        flag_ref: &FlagRef<'_>,
        inline: Option<String>,
    ) -> Result<()> {
        if ctx.unknown_flags().is_none() {
            let name = flag_ref.name();
            let suggestions = suggest(&name, SuggestDistance::Default, ctx.flags().visible_names())
                .into_iter()
                .map(|s| format!("--{s}"))
                .collect();
            return Err(CliError::InvalidFlag {
                flag: prefix.to_string(),
                suggestions,
            });
        }

        let args = self.args;
        let value = match inline {
            Some(value) => Some(value),
            None => match args.get(self.current) {
                Some(next) if !is_flag_shaped(next) => {
                    self.current += 1;
                    Some(next.clone())
                }
                _ => None,
            },
        };
        trace!(flag = prefix, ?value, "accepted unknown flag");
        if let Some(unknown) = ctx.unknown_flags_mut() {
            unknown.record_unknown(&flag_ref.name(), value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::Command;
    use crate::cli::flag::Flag;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn command() -> Command {
        Command::new("test")
            .flag(Flag::new("force").shorthand('f').mode(AssignedMode::Boolean))
            .flag(Flag::new("region").shorthand('r').alias("location"))
            .flag(Flag::new("meta").mode(AssignedMode::Repeatable))
    }

    #[test]
    fn test_read_next_arg_skips_flags() {
        let cmd = command();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut out, &mut err);
        ctx.enter_command(&cmd);

        let tokens = args(&["--force", "-r", "cn", "ls", "x"]);
        let mut parser = Parser::new(&tokens);
        let next = parser.read_next_arg(&mut ctx).unwrap();

        assert_eq!(next.as_deref(), Some("ls"));
        assert_eq!(parser.remains(), ["x"]);
        assert!(ctx.flags().is_assigned("force"));
        assert_eq!(ctx.flags().value("region"), Some("cn"));
    }

    #[test]
    fn test_read_all_collects_positionals() {
        let cmd = command();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut out, &mut err);
        ctx.enter_command(&cmd);

        let tokens = args(&["a", "--location=us", "b", "--meta", "k=v", "x=y", "-f", "c"]);
        let mut parser = Parser::new(&tokens);
        let rest = parser.read_all(&mut ctx).unwrap();

        assert_eq!(rest, vec!["a", "b", "c"]);
        assert_eq!(ctx.flags().value("region"), Some("us"));
        let meta = ctx.flags().get("meta").unwrap();
        assert_eq!(meta.values(), ["k=v", "x=y"]);
        assert_eq!(meta.field_value("x"), Some("y"));
        assert!(ctx.flags().is_assigned("force"));
    }

    #[test]
    fn test_single_value_at_end_of_stream() {
        let cmd = command();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut out, &mut err);
        ctx.enter_command(&cmd);

        let tokens = args(&["--region"]);
        let result = Parser::new(&tokens).read_all(&mut ctx);
        assert!(matches!(result, Err(CliError::MissingValue(name)) if name == "region"));
    }

    #[test]
    fn test_boolean_with_inline_value() {
        let cmd = command();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut out, &mut err);
        ctx.enter_command(&cmd);

        let tokens = args(&["--force=yes"]);
        let result = Parser::new(&tokens).read_all(&mut ctx);
        assert!(matches!(result, Err(CliError::UnexpectedValue(_))));
    }

    #[test]
    fn test_unknown_flag_suggests() {
        let cmd = command();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut out, &mut err);
        ctx.enter_command(&cmd);

        let tokens = args(&["--regin", "cn"]);
        let result = Parser::new(&tokens).read_all(&mut ctx);
        match result {
            Err(CliError::InvalidFlag { flag, suggestions }) => {
                assert_eq!(flag, "--regin");
                assert_eq!(suggestions, vec!["--region"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_flag_accepted_when_enabled() {
        let cmd = command().enable_unknown_flags();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut out, &mut err);
        ctx.enter_command(&cmd);

        let tokens = args(&["--extra", "1", "--switch", "--force", "pos"]);
        let rest = Parser::new(&tokens).read_all(&mut ctx).unwrap();

        assert_eq!(rest, vec!["pos"]);
        let unknown = ctx.unknown_flags().unwrap();
        assert_eq!(unknown.value("extra"), Some("1"));
        assert!(unknown.is_assigned("switch"));
        assert!(ctx.flags().is_assigned("force"));
    }

    #[test]
    fn test_end_of_flags_marker() {
        let cmd = command();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut out, &mut err);
        ctx.enter_command(&cmd);

        let tokens = args(&["-f", "--", "--force", "-"]);
        let rest = Parser::new(&tokens).read_all(&mut ctx).unwrap();
        assert_eq!(rest, vec!["--force", "-"]);
    }

    #[test]
    fn test_end_of_flags_carried_over() {
        let cmd = command();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut out, &mut err);
        ctx.enter_command(&cmd);

        let tokens = args(&["--", "ls", "--force"]);
        let mut parser = Parser::new(&tokens);
        assert_eq!(parser.read_next_arg(&mut ctx).unwrap().as_deref(), Some("ls"));
        assert!(parser.flags_ended());

        let mut inner = Parser::with_flags_ended(parser.remains(), parser.flags_ended());
        assert_eq!(inner.read_all(&mut ctx).unwrap(), vec!["--force"]);
        assert!(!ctx.flags().is_assigned("force"));
    }
}
