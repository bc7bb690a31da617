//! `echo` command: print the arguments back untouched

use crate::cli::Command;
use crate::i18n::Text;
use std::io::Write;

pub fn command() -> Command {
    Command::new("echo")
        .short(Text::new("Print the arguments as given", "原样打印参数"))
        .usage("echo [arg...]")
        .sample("cmdtree echo --not-a-flag value -- x")
        .keep_args()
        .enable_unknown_flags()
        .run(|ctx, args| {
            writeln!(ctx.stdout(), "{}", args.join(" "))?;
            Ok(())
        })
}
