use crate::cli::Command;
use crate::i18n::Text;
use crate::VERSION;
use std::io::Write;

pub fn command() -> Command {
    Command::new("version")
        .short(Text::new("Print the version", "打印版本号"))
        .run(|ctx, _args| {
            writeln!(ctx.stdout(), "cmdtree {VERSION}")?;
            Ok(())
        })
}
