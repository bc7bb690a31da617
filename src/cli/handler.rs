//! Capabilities a command may have
//!
//! A command can run, render its own help and produce completion candidates.
//! Each capability is optional; closures with the matching signature
//! implement the traits directly.

use crate::cli::command::Command;
use crate::cli::context::Context;
use crate::cli::help;
use crate::error::Result;

/// Business logic of a command
pub trait Runnable {
    fn run(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<()>;
}

impl<F> Runnable for F
where
    F: Fn(&mut Context<'_>, &[String]) -> Result<()>,
{
    fn run(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
        self(ctx, args)
    }
}

/// Custom completion candidates
pub trait Completable {
    fn complete(&self, ctx: &Context<'_>, args: &[String]) -> Vec<String>;
}

impl<F> Completable for F
where
    F: Fn(&Context<'_>, &[String]) -> Vec<String>,
{
    fn complete(&self, ctx: &Context<'_>, args: &[String]) -> Vec<String> {
        self(ctx, args)
    }
}

/// Help output of a command.
///
/// Every section has a default rendering; implementors override the
/// sections they want to change, or `render` to replace the whole layout.
pub trait HelpRenderable {
    fn print_head(&self, cmd: &Command, ctx: &mut Context<'_>) -> Result<()> {
        help::print_head(cmd, ctx)
    }

    fn print_usage(&self, cmd: &Command, ctx: &mut Context<'_>) -> Result<()> {
        help::print_usage(cmd, ctx)
    }

    fn print_sub_commands(&self, cmd: &Command, ctx: &mut Context<'_>) -> Result<()> {
        help::print_sub_commands(cmd, ctx)
    }

    fn print_flags(&self, cmd: &Command, ctx: &mut Context<'_>) -> Result<()> {
        help::print_flags(cmd, ctx)
    }

    fn print_tail(&self, cmd: &Command, ctx: &mut Context<'_>) -> Result<()> {
        help::print_tail(cmd, ctx)
    }

    fn render(&self, cmd: &Command, ctx: &mut Context<'_>, _args: &[String]) -> Result<()> {
        self.print_head(cmd, ctx)?;
        self.print_usage(cmd, ctx)?;
        self.print_sub_commands(cmd, ctx)?;
        self.print_flags(cmd, ctx)?;
        self.print_tail(cmd, ctx)
    }
}

/// The standard help layout
pub struct DefaultHelp;

impl HelpRenderable for DefaultHelp {}

impl<F> HelpRenderable for F
where
    F: Fn(&Command, &mut Context<'_>, &[String]) -> Result<()>,
{
    fn render(&self, cmd: &Command, ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
        self(cmd, ctx, args)
    }
}
