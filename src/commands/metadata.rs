//! Hidden `metadata` command: export the command tree as JSON

use crate::cli::{AssignedMode, Command, Context, Flag};
use crate::commands::build_root;
use crate::error::Result;
use crate::i18n::Text;
use anyhow::Context as _;
use std::io::Write;

const PRETTY_FLAG: &str = "pretty";

pub fn command() -> Command {
    Command::new("metadata")
        .short(Text::new(
            "Export command metadata as JSON",
            "以 JSON 格式导出命令元数据",
        ))
        .hidden()
        .flag(
            Flag::new(PRETTY_FLAG)
                .mode(AssignedMode::Boolean)
                .short(Text::new("indent the output", "格式化输出")),
        )
        .run(export)
}

fn export(ctx: &mut Context<'_>, _args: &[String]) -> Result<()> {
    let metadata = build_root().metadata();
    let json = if ctx.flags().is_assigned(PRETTY_FLAG) {
        serde_json::to_string_pretty(&metadata)
    } else {
        serde_json::to_string(&metadata)
    };
    let json = json.context("failed to serialize command metadata")?;

    writeln!(ctx.stdout(), "{json}")?;
    Ok(())
}
