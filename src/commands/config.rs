//! `config` command: inspect the configuration file

use crate::cli::suggester::suggest;
use crate::cli::{AssignedMode, Command, Context, Flag, Runnable, SuggestDistance};
use crate::commands::CONFIG_FILE_FLAG;
use crate::config::{
    decide_config_file, is_revealable, load_config, mask, OptionValue, CRED_OPTIONS, DEFAULT_OPTIONS,
    PAIR_SECTIONS,
};
use crate::error::{CliError, Result};
use crate::i18n::Text;
use std::io::Write;
use tracing::debug;

const REVEAL_FLAG: &str = "reveal";

pub fn command() -> Command {
    Command::new("config")
        .short(Text::new("Inspect the configuration", "查看配置"))
        .long(Text::new(
            "The configuration file is YAML with a required `Credentials` section and\n\
             optional `Default`, `Bucket-Endpoint`, `Bucket-Cname` and `AkService` sections.",
            "配置文件为 YAML 格式，必须包含 `Credentials` 段，\n\
             可选 `Default`、`Bucket-Endpoint`、`Bucket-Cname` 和 `AkService` 段。",
        ))
        .sub_command(
            Command::new("show")
                .short(Text::new("Print the loaded options", "打印已加载的配置项"))
                .usage("show [option...] [--reveal]")
                .sample("cmdtree config show endpoint --config-file ./cfg.yml")
                .flag(
                    Flag::new(REVEAL_FLAG)
                        .mode(AssignedMode::Boolean)
                        .short(Text::new("print secrets unmasked", "显示未遮盖的密钥")),
                )
                .runnable(ShowConfig)
                .auto_complete(complete_option_names),
        )
        .sub_command(
            Command::new("path")
                .short(Text::new("Print the configuration file path", "打印配置文件路径"))
                .run(|ctx, _args| {
                    let path = decide_config_file(ctx.flags().value(CONFIG_FILE_FLAG));
                    writeln!(ctx.stdout(), "{}", path.display())?;
                    Ok(())
                }),
        )
}

/// Prints every loaded option, or only the named ones
struct ShowConfig;

impl Runnable for ShowConfig {
    fn run(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
        let options = load_config(ctx.flags().value(CONFIG_FILE_FLAG))?;
        let reveal = ctx.flags().is_assigned(REVEAL_FLAG);
        debug!(count = options.len(), reveal, "showing config");

        let unknown: Vec<&String> = args.iter().filter(|a| !options.contains_key(*a)).collect();
        if let Some(name) = unknown.first() {
            let known = options.keys().map(String::as_str);
            let suggestions = suggest(name, SuggestDistance::Default, known);
            return Err(CliError::with_suggestions(
                format!("option '{name}' is not set"),
                suggestions,
            ));
        }

        let display = |name: &str, value: &str| {
            if reveal || is_revealable(name) {
                value.to_string()
            } else {
                mask(value)
            }
        };

        for (name, value) in &options {
            if !args.is_empty() && !args.contains(name) {
                continue;
            }
            match value {
                OptionValue::Plain(value) => {
                    writeln!(ctx.stdout(), "{name} = {}", display(name, value))?;
                }
                OptionValue::Section(pairs) => {
                    writeln!(ctx.stdout(), "[{name}]")?;
                    for (key, value) in pairs {
                        writeln!(ctx.stdout(), "  {key} = {value}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn complete_option_names(ctx: &Context<'_>, _args: &[String]) -> Vec<String> {
    let current = ctx.completion().map(|c| c.current()).unwrap_or_default();
    if current.starts_with('-') {
        return ctx.flags().complete_names(current);
    }

    CRED_OPTIONS
        .iter()
        .chain(DEFAULT_OPTIONS)
        .map(|o| o.name)
        .chain(PAIR_SECTIONS.iter().copied())
        .filter(|name| name.starts_with(current))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Completion;
    use std::fs;
    use tempfile::TempDir;

    fn run(cmd: &Command, tokens: &[&str]) -> (String, String) {
        let args: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut ctx = Context::new(&mut out, &mut err);
            cmd.execute(&mut ctx, &args);
        }
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    fn root() -> Command {
        Command::new("cmdtree")
            .flag(Flag::new(CONFIG_FILE_FLAG).shorthand('c').persistent())
            .sub_command(command())
    }

    #[test]
    fn test_show_masks_secrets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cfg.yml");
        fs::write(
            &path,
            "Credentials:\n  endpoint: oss.example.com\n  accessKeySecret: abcdefgh\nBucket-Cname:\n  site: cdn.example.com\n",
        )
        .unwrap();
        let file = path.to_str().unwrap();

        let (out, _) = run(&root(), &["config", "show", "-c", file]);
        assert!(out.contains("endpoint = oss.example.com"));
        assert!(out.contains("accessKeySecret = ab****gh"));
        assert!(out.contains("[Bucket-Cname]\n  site = cdn.example.com"));

        let (out, _) = run(&root(), &["config", "show", "--reveal", "accessKeySecret", "-c", file]);
        assert_eq!(out, "accessKeySecret = abcdefgh\n");
    }

    #[test]
    fn test_show_unknown_option_suggests() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cfg.yml");
        fs::write(&path, "Credentials:\n  endpoint: oss.example.com\n").unwrap();

        let (out, err) = run(&root(), &["config", "show", "endpont", "-c", path.to_str().unwrap()]);
        assert!(out.is_empty());
        assert!(err.contains("option 'endpont' is not set"));
        assert!(err.contains("  endpoint"));
    }

    #[test]
    fn test_complete_option_names() {
        let cmd = root();
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let completion = Completion::new(vec!["config".into(), "show".into()], "proxy");
            let mut ctx = Context::new(&mut out, &mut err).with_completion(Some(completion));
            cmd.execute(&mut ctx, &[]);
        }
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "proxyHost\nproxyUser\nproxyPwd\n");
    }
}
