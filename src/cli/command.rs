//! Command tree and recursive dispatch

use crate::cli::context::Context;
use crate::cli::flag::Flag;
use crate::cli::flag_set::FlagSet;
use crate::cli::handler::{Completable, DefaultHelp, HelpRenderable, Runnable};
use crate::cli::parser::Parser;
use crate::cli::suggester::{suggest, SuggestDistance};
use crate::error::{CliError, Exit, Remedy, Result};
use crate::i18n::{Language, Text};
use colored::Colorize;
use std::fmt;
use std::io::{self, Write};
use tracing::debug;

/// Positional token that switches to help mode
pub const HELP_KEYWORD: &str = "help";

/// A command or sub-command definition
#[derive(Default)]
pub struct Command {
    name: String,
    short: Option<Text>,
    long: Option<Text>,
    usage: String,
    sample: String,
    hidden: bool,

    enable_unknown_flags: bool,
    suggest_distance: SuggestDistance,
    keep_args: bool,

    run: Option<Box<dyn Runnable>>,
    help: Option<Box<dyn HelpRenderable>>,
    complete: Option<Box<dyn Completable>>,

    sub_commands: Vec<Command>,
    flags: FlagSet,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Command {
            name: name.into(),
            ..Default::default()
        }
    }

    /// One-line description shown in command listings
    pub fn short(mut self, text: Text) -> Self {
        self.short = Some(text);
        self
    }

    /// Description shown at the top of this command's help
    pub fn long(mut self, text: Text) -> Self {
        self.long = Some(text);
        self
    }

    /// Usage syntax, without the parent command names
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn sample(mut self, sample: impl Into<String>) -> Self {
        self.sample = sample.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Accept flags nobody declared instead of failing
    pub fn enable_unknown_flags(mut self) -> Self {
        self.enable_unknown_flags = true;
        self
    }

    pub fn suggest_distance(mut self, distance: SuggestDistance) -> Self {
        self.suggest_distance = distance;
        self
    }

    /// Pass the remaining tokens to the run handler without parsing them
    pub fn keep_args(mut self) -> Self {
        self.keep_args = true;
        self
    }

    pub fn run<F>(self, f: F) -> Self
    where
        F: Fn(&mut Context<'_>, &[String]) -> Result<()> + 'static,
    {
        self.runnable(f)
    }

    pub fn runnable(mut self, handler: impl Runnable + 'static) -> Self {
        self.run = Some(Box::new(handler));
        self
    }

    pub fn help<F>(self, f: F) -> Self
    where
        F: Fn(&Command, &mut Context<'_>, &[String]) -> Result<()> + 'static,
    {
        self.help_renderer(f)
    }

    pub fn help_renderer(mut self, renderer: impl HelpRenderable + 'static) -> Self {
        self.help = Some(Box::new(renderer));
        self
    }

    pub fn auto_complete<F>(self, f: F) -> Self
    where
        F: Fn(&Context<'_>, &[String]) -> Vec<String> + 'static,
    {
        self.completer(f)
    }

    pub fn completer(mut self, completer: impl Completable + 'static) -> Self {
        self.complete = Some(Box::new(completer));
        self
    }

    /// Declare a flag on this command
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.add(flag);
        self
    }

    pub fn sub_command(mut self, cmd: Command) -> Self {
        self.add_sub_command(cmd);
        self
    }

    /// Append a child command.
    ///
    /// # Panics
    ///
    /// Panics when a child with the same name already exists.
    pub fn add_sub_command(&mut self, cmd: Command) {
        if self.sub_commands.iter().any(|c| c.name == cmd.name) {
            panic!("command '{}' already has a sub command '{}'", self.name, cmd.name);
        }
        self.sub_commands.push(cmd);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_text(&self) -> Option<&Text> {
        self.short.as_ref()
    }

    pub fn long_text(&self) -> Option<&Text> {
        self.long.as_ref()
    }

    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    pub fn sample_text(&self) -> &str {
        &self.sample
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn accepts_unknown_flags(&self) -> bool {
        self.enable_unknown_flags
    }

    pub fn is_runnable(&self) -> bool {
        self.run.is_some()
    }

    /// Flags declared on this command
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut FlagSet {
        &mut self.flags
    }

    /// Children in declaration order
    pub fn sub_commands(&self) -> &[Command] {
        &self.sub_commands
    }

    /// Find a child by exact name
    pub fn get_sub_command(&self, name: &str) -> Option<&Command> {
        self.sub_commands.iter().find(|c| c.name == name)
    }

    /// Visible children close to a mistyped name
    pub fn suggestions(&self, name: &str) -> Vec<String> {
        suggest(
            name,
            self.suggest_distance,
            self.sub_commands
                .iter()
                .filter(|c| !c.hidden)
                .map(|c| c.name.as_str()),
        )
    }

    /// Resolve and execute `args` starting at this command.
    ///
    /// This is the top-level entry point: it enters `self` on the context,
    /// runs the resolution and turns any failure into a reported [`Exit`].
    pub fn execute(&self, ctx: &mut Context<'_>, args: &[String]) -> Exit {
        let args = match ctx.completion() {
            Some(completion) => completion.args().to_vec(),
            None => args.to_vec(),
        };

        ctx.enter_command(self);
        match self.execute_inner(ctx, &args, false) {
            Ok(()) => Exit::Success,
            Err(err) => process_error(ctx, &err),
        }
    }

    /// `flags_ended` is set once a `--` was read at an outer level
    fn execute_inner(
        &self,
        ctx: &mut Context<'_>,
        args: &[String],
        flags_ended: bool,
    ) -> Result<()> {
        debug!(command = %self.name, ?args, flags_ended, "resolving");
        let mut parser = Parser::with_flags_ended(args, flags_ended);
        let next = parser.read_next_arg(ctx)?;

        if next.as_deref() == Some(HELP_KEYWORD) {
            ctx.set_help();
            return self.execute_inner(ctx, parser.remains(), parser.flags_ended());
        }

        if let Some(arg) = &next {
            if let Some(sub) = self.get_sub_command(arg) {
                ctx.enter_command(sub);
                return sub.execute_inner(ctx, parser.remains(), parser.flags_ended());
            }
            if self.run.is_none() {
                return Err(CliError::InvalidCommand {
                    name: arg.clone(),
                    suggestions: self.suggestions(arg),
                });
            }
        }

        let mut call_args = Vec::new();
        let remains = if self.keep_args {
            args.to_vec()
        } else {
            call_args.extend(next);
            parser.read_all(ctx)?
        };
        for arg in remains {
            if arg == HELP_KEYWORD {
                ctx.set_help();
            } else {
                call_args.push(arg);
            }
        }

        if ctx.help_flag_assigned() {
            ctx.set_help();
        }
        if !ctx.is_completing() {
            ctx.flags().validate()?;
        }

        if ctx.is_completing() {
            self.execute_complete(ctx, &call_args);
            return Ok(());
        }

        match &self.run {
            Some(run) if !ctx.is_help() => {
                debug!(command = %ctx.command_path(), ?call_args, "running");
                run.run(ctx, &call_args)
            }
            _ => self.execute_help(ctx, &call_args),
        }
    }

    fn execute_help(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
        match &self.help {
            Some(renderer) => renderer.render(self, ctx, args),
            None => DefaultHelp.render(self, ctx, args),
        }
    }

    fn execute_complete(&self, ctx: &mut Context<'_>, args: &[String]) {
        let candidates = match &self.complete {
            Some(completer) => completer.complete(ctx, args),
            None => self.fallback_candidates(ctx),
        };
        debug!(command = %self.name, count = candidates.len(), "completing");

        for candidate in candidates {
            if let Err(e) = writeln!(ctx.stdout(), "{candidate}") {
                debug!(error = %e, %candidate, "dropped completion candidate");
            }
        }
    }

    /// Flags (when completing a `-` word) or children matching the current word
    fn fallback_candidates(&self, ctx: &Context<'_>) -> Vec<String> {
        let current = ctx.completion().map(|c| c.current()).unwrap_or_default();

        if current.starts_with('-') {
            ctx.flags().complete_names(current)
        } else {
            self.sub_commands
                .iter()
                .filter(|c| !c.hidden && c.name.starts_with(current))
                .map(|c| c.name.clone())
                .collect()
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("hidden", &self.hidden)
            .field("runnable", &self.run.is_some())
            .field("flags", &self.flags)
            .field("sub_commands", &self.sub_commands)
            .finish()
    }
}

/// Report a failed invocation on the error stream and classify it
fn process_error(ctx: &mut Context<'_>, err: &CliError) -> Exit {
    if ctx.is_completing() {
        debug!(error = %err, "resolution failed while completing");
        return Exit::Success;
    }

    let exit = err.exit();
    debug!(error = ?err, code = exit.code(), "command failed");

    let lang = ctx.language();
    let color = ctx.color();
    let prefix = if color {
        "ERROR:".red().bold().to_string()
    } else {
        "ERROR:".to_string()
    };
    // stderr is the last place left to report to, so its write errors are dropped
    let _ = writeln!(ctx.stderr(), "{prefix} {err}");
    match err.remedy() {
        Remedy::Suggestions(suggestions) => {
            let _ = print_suggestions(ctx.stderr(), lang, suggestions);
        }
        Remedy::Tip(tip) => {
            let tip = tip.get(lang);
            let _ = if color {
                writeln!(ctx.stderr(), "\n{}", tip.yellow())
            } else {
                writeln!(ctx.stderr(), "\n{tip}")
            };
        }
        Remedy::None => {}
    }
    exit
}

fn print_suggestions(w: &mut dyn Write, lang: Language, suggestions: &[String]) -> io::Result<()> {
    if suggestions.is_empty() {
        return Ok(());
    }
    writeln!(w, "\n{}", Text::new("Did you mean:", "你是否想输入：").get(lang))?;
    for suggestion in suggestions {
        writeln!(w, "  {suggestion}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::flag::AssignedMode;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_get_sub_command_first_match() {
        let root = Command::new("root")
            .sub_command(Command::new("a"))
            .sub_command(Command::new("b"));
        assert_eq!(root.get_sub_command("b").map(Command::name), Some("b"));
        assert!(root.get_sub_command("B").is_none());
    }

    #[test]
    #[should_panic(expected = "already has a sub command")]
    fn test_duplicate_sub_command_panics() {
        let _ = Command::new("root")
            .sub_command(Command::new("a"))
            .sub_command(Command::new("a"));
    }

    #[test]
    fn test_suggestions_skip_hidden() {
        let root = Command::new("root")
            .sub_command(Command::new("list"))
            .sub_command(Command::new("lost").hidden());
        assert_eq!(root.suggestions("lst"), vec!["list"]);
    }

    #[test]
    fn test_keep_args_passes_raw_tokens() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let root = Command::new("root").sub_command(
            Command::new("exec")
                .keep_args()
                .run(move |_ctx, args| {
                    sink.borrow_mut().extend(args.iter().cloned());
                    Ok(())
                }),
        );

        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut out, &mut err);
        let exit = root.execute(&mut ctx, &args(&["exec", "ls", "--unknown", "-l"]));

        assert_eq!(exit, Exit::Success);
        assert_eq!(*seen.borrow(), vec!["ls", "--unknown", "-l"]);
    }

    #[test]
    fn test_flags_before_sub_command_are_inherited() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let root = Command::new("root")
            .flag(Flag::new("profile").persistent())
            .sub_command(Command::new("ls").run(move |ctx, _args| {
                *sink.borrow_mut() = ctx.flags().value("profile").map(String::from);
                Ok(())
            }));

        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context::new(&mut out, &mut err);
        let exit = root.execute(&mut ctx, &args(&["--profile", "dev", "ls"]));

        assert_eq!(exit, Exit::Success);
        assert_eq!(seen.borrow().as_deref(), Some("dev"));
    }

    #[test]
    fn test_help_flag_renders_help() {
        let root = Command::new("root")
            .short(Text::new("Root command", "根命令"))
            .sub_command(
                Command::new("ls")
                    .flag(Flag::new("all").mode(AssignedMode::Boolean))
                    .run(|_ctx, _args| Err(CliError::handler("should not run"))),
            );

        let mut out = Vec::new();
        let mut err = Vec::new();
        let exit = {
            let mut ctx = Context::new(&mut out, &mut err);
            root.execute(&mut ctx, &args(&["ls", "-h"]))
        };

        assert_eq!(exit, Exit::Success);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("root ls"));
        assert!(out.contains("--all"));
    }

    #[test]
    fn test_error_prefix_plain_unless_colored() {
        let root = Command::new("root").run(|_ctx, _args| {
            Err(CliError::with_tip("no credentials", Text::new("run config first", "")))
        });

        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut ctx = Context::new(&mut out, &mut err);
            root.execute(&mut ctx, &[]);
        }
        let text = String::from_utf8(err).unwrap();
        assert_eq!(text, "ERROR: no credentials\n\nrun config first\n");
        assert!(!text.contains('\x1b'));

        colored::control::set_override(true);
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut ctx = Context::new(&mut out, &mut err).with_color(true);
            root.execute(&mut ctx, &[]);
        }
        colored::control::unset_override();
        let text = String::from_utf8(err).unwrap();
        assert!(text.contains('\x1b'));
        assert!(text.contains("no credentials"));
    }

    #[test]
    fn test_print_suggestions() {
        let mut buf = Vec::new();
        print_suggestions(&mut buf, Language::En, &["list".to_string()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Did you mean:"));
        assert!(text.contains("  list"));

        let mut buf = Vec::new();
        print_suggestions(&mut buf, Language::En, &[]).unwrap();
        assert!(buf.is_empty());
    }
}
