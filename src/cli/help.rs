//! Standard help layout: head, usage, sub-commands, flags, tail

use crate::cli::command::Command;
use crate::cli::context::Context;
use crate::cli::flag::Flag;
use crate::error::Result;
use crate::i18n::Text;
use std::io::Write;

/// Short and long description
pub fn print_head(cmd: &Command, ctx: &mut Context<'_>) -> Result<()> {
    let lang = ctx.language();
    if let Some(short) = cmd.short_text() {
        writeln!(ctx.stdout(), "{}", short.get(lang))?;
    }
    if let Some(long) = cmd.long_text() {
        writeln!(ctx.stdout(), "\n{}", long.get(lang))?;
    }
    Ok(())
}

/// Usage line prefixed with the names of every enclosing command.
///
/// A declared usage starts with the command's own name; without one the
/// name is followed by a generic synopsis.
pub fn usage_with_parent(cmd: &Command, ctx: &Context<'_>) -> String {
    let usage = if !cmd.usage_text().is_empty() {
        cmd.usage_text().to_string()
    } else if cmd.sub_commands().iter().any(|c| !c.is_hidden()) {
        format!("{} <command> [flags]", cmd.name())
    } else {
        format!("{} [flags]", cmd.name())
    };
    let parents = ctx.path().split_last().map(|(_, p)| p).unwrap_or_default();
    parents
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(usage.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Usage line and sample
pub fn print_usage(cmd: &Command, ctx: &mut Context<'_>) -> Result<()> {
    let lang = ctx.language();
    let usage = usage_with_parent(cmd, ctx);
    writeln!(
        ctx.stdout(),
        "\n{}\n  {}",
        Text::new("Usage:", "用法：").get(lang),
        usage
    )?;
    if !cmd.sample_text().is_empty() {
        writeln!(
            ctx.stdout(),
            "\n{}\n  {}",
            Text::new("Sample:", "示例：").get(lang),
            cmd.sample_text()
        )?;
    }
    Ok(())
}

/// Listing of the visible children
pub fn print_sub_commands(cmd: &Command, ctx: &mut Context<'_>) -> Result<()> {
    let lang = ctx.language();
    let rows: Vec<(String, String)> = cmd
        .sub_commands()
        .iter()
        .filter(|c| !c.is_hidden())
        .map(|c| {
            let short = c.short_text().map(|t| t.get(lang)).unwrap_or_default();
            (c.name().to_string(), short.to_string())
        })
        .collect();
    if rows.is_empty() {
        return Ok(());
    }

    writeln!(ctx.stdout(), "\n{}", Text::new("Commands:", "命令：").get(lang))?;
    write_rows(ctx.stdout(), &rows)?;
    Ok(())
}

/// Visible flags of the current level, uncategorized first, then one group
/// per category in the order categories first appear
pub fn print_flags(_cmd: &Command, ctx: &mut Context<'_>) -> Result<()> {
    let lang = ctx.language();
    let visible: Vec<&Flag> = ctx.flags().flags().iter().filter(|f| !f.hidden).collect();
    if visible.is_empty() {
        return Ok(());
    }

    let mut groups: Vec<(Option<&str>, Vec<(String, String)>)> = Vec::new();
    for flag in &visible {
        let category = flag.category.as_deref();
        let row = (
            flag_label(flag),
            flag.short
                .as_ref()
                .map(|t| t.get(lang).to_string())
                .unwrap_or_default(),
        );
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, rows)) => rows.push(row),
            None => groups.push((category, vec![row])),
        }
    }
    groups.sort_by_key(|(category, _)| category.is_some());

    let mut out = Vec::new();
    for (category, rows) in &groups {
        match category {
            None => writeln!(out, "\n{}", Text::new("Flags:", "参数：").get(lang))?,
            Some(category) => writeln!(out, "\n{category}:")?,
        }
        write_rows(&mut out, rows)?;
    }
    ctx.stdout().write_all(&out)?;
    Ok(())
}

/// Pointer to more detailed help
pub fn print_tail(cmd: &Command, ctx: &mut Context<'_>) -> Result<()> {
    let lang = ctx.language();
    let path = ctx.command_path();
    let line = if cmd.sub_commands().iter().any(|c| !c.is_hidden()) {
        Text::new(
            format!("Use `{path} <command> --help` for more information about a command."),
            format!("使用 `{path} <command> --help` 获取命令的更多信息。"),
        )
    } else {
        Text::new(
            format!("Use `{path} --help` for more information."),
            format!("使用 `{path} --help` 获取更多信息。"),
        )
    };
    writeln!(ctx.stdout(), "\n{}", line.get(lang))?;
    Ok(())
}

fn flag_label(flag: &Flag) -> String {
    match flag.shorthand {
        Some(c) => format!("--{}, -{}", flag.name, c),
        None => format!("--{}", flag.name),
    }
}

fn write_rows(w: &mut dyn Write, rows: &[(String, String)]) -> std::io::Result<()> {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, text) in rows {
        if text.is_empty() {
            writeln!(w, "  {label}")?;
        } else {
            writeln!(w, "  {label:<width$}  {text}")?;
        }
    }
    Ok(())
}
