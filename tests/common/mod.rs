//! Common test utilities
#![allow(dead_code)]

use cmdtree::cli::{Command, Completion, Context};
use cmdtree::Exit;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with a configuration file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cmdtreeconfig.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// What one invocation produced
pub struct Outcome {
    pub exit: Exit,
    pub stdout: String,
    pub stderr: String,
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

/// Execute `tokens` against `root`, capturing both streams
pub fn run(root: &Command, tokens: &[&str]) -> Outcome {
    execute(root, tokens, None)
}

/// Execute `root` in completion mode
pub fn complete(root: &Command, words: &[&str], current: &str) -> Outcome {
    execute(root, &[], Some(Completion::new(args(words), current)))
}

fn execute(root: &Command, tokens: &[&str], completion: Option<Completion>) -> Outcome {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit = {
        let mut ctx = Context::new(&mut out, &mut err).with_completion(completion);
        root.execute(&mut ctx, &args(tokens))
    };
    Outcome {
        exit,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}
