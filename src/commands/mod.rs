//! Commands of the `cmdtree` binary

pub mod config;
pub mod echo;
pub mod metadata;
pub mod version;

use crate::cli::{Command, Flag};
use crate::cli::context::LANGUAGE_FLAG;
use crate::i18n::Text;

/// Persistent flag selecting the configuration file
pub const CONFIG_FILE_FLAG: &str = "config-file";

/// Build the full command tree
pub fn build_root() -> Command {
    Command::new("cmdtree")
        .short(Text::new(
            "A command tree with flags, help and shell completion",
            "支持参数、帮助与命令补全的命令树",
        ))
        .long(Text::new(
            "Run `cmdtree config show` to inspect the loaded configuration.\n\
             Set COMP_LINE and COMP_POINT to get completion candidates instead.",
            "运行 `cmdtree config show` 查看加载的配置。\n\
             设置 COMP_LINE 和 COMP_POINT 可获取补全候选项。",
        ))
        .flag(
            Flag::new(CONFIG_FILE_FLAG)
                .shorthand('c')
                .alias("config")
                .persistent()
                .short(Text::new(
                    "configuration file path, ~/.cmdtreeconfig by default",
                    "配置文件路径，默认为 ~/.cmdtreeconfig",
                )),
        )
        .flag(
            Flag::new(LANGUAGE_FLAG)
                .persistent()
                .short(Text::new("display language, EN or CH", "显示语言，EN 或 CH")),
        )
        .sub_command(config::command())
        .sub_command(echo::command())
        .sub_command(version::command())
        .sub_command(metadata::command())
}
