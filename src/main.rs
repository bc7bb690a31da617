use cmdtree::cli::{Completion, Context};
use cmdtree::commands::build_root;
use cmdtree::config::read_log_level;
use cmdtree::i18n::Language;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "CMDTREE_LOG";

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let root = build_root();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let stdout = io::stdout();
    let stderr = io::stderr();
    let color = stderr.is_terminal();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    let mut ctx = Context::new(&mut out, &mut err)
        .with_language(Language::from_env())
        .with_completion(Completion::from_env())
        .with_color(color);

    root.execute(&mut ctx, &args).into()
}

/// Log to stderr. `CMDTREE_LOG` wins, then the `loglevel` option of the
/// default configuration file, then `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = read_log_level(None).ok().flatten();
        EnvFilter::new(level.as_deref().unwrap_or("warn"))
    });

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}
