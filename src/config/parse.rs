//! Configuration file discovery and parsing

use crate::config::schema::{
    check_config, cred_option_name, default_option_name, DEFAULT_OPTIONS, OPTION_LOG_LEVEL,
};
use crate::config::types::{
    OptionMap, OptionValue, CRED_SECTION, DEFAULT_SECTION, PAIR_SECTIONS,
};
use crate::error::{ConfigError, ConfigResult};
use directories::BaseDirs;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration file used when none is given
pub const DEFAULT_CONFIG_FILE: &str = "~/.cmdtreeconfig";

/// Section name to option name to raw value, as written in the file
type Sections = BTreeMap<String, BTreeMap<String, String>>;

/// Resolve the configuration file to read, expanding a leading `~/`
pub fn decide_config_file(config_file: Option<&str>) -> PathBuf {
    let file = match config_file {
        Some(file) if !file.is_empty() => file,
        _ => DEFAULT_CONFIG_FILE,
    };

    if let Some(rest) = file.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(file)
}

/// Read, parse and validate a configuration file
pub fn load_config(config_file: Option<&str>) -> ConfigResult<OptionMap> {
    let path = decide_config_file(config_file);
    debug!(path = %path.display(), "loading config");

    let contents = read_file(&path)?;
    let options = parse_config(&contents, &path)?;
    check_config(&options)?;
    Ok(options)
}

/// Flatten the sections of a configuration document into an option map.
///
/// Default-section options are kept only when they are known. Credential
/// options are renamed to their canonical name when known and kept verbatim
/// otherwise, overriding defaults. Pair sections become nested maps.
pub fn parse_config(yaml: &str, path: &Path) -> ConfigResult<OptionMap> {
    let sections = parse_sections(yaml, path)?;
    let mut options = OptionMap::new();

    if let Some(section) = sections.get(DEFAULT_SECTION) {
        for (name, value) in section {
            if let Some(canonical) = default_option_name(name) {
                options.insert(canonical.to_string(), OptionValue::Plain(value.clone()));
            }
        }
    }

    let cred = sections
        .get(CRED_SECTION)
        .ok_or_else(|| ConfigError::MissingSection {
            path: path.to_path_buf(),
            section: CRED_SECTION.to_string(),
        })?;
    for (name, value) in cred {
        let key = cred_option_name(name).map(str::to_string).unwrap_or_else(|| name.clone());
        options.insert(key, OptionValue::Plain(value.clone()));
    }

    for section in PAIR_SECTIONS {
        if let Some(pairs) = sections.get(*section) {
            options.insert(section.to_string(), OptionValue::Section(pairs.clone()));
        }
    }

    debug!(options = options.len(), "config parsed");
    Ok(options)
}

/// Read only the log level, looked up in the credentials section first and
/// then in the default section
pub fn read_log_level(config_file: Option<&str>) -> ConfigResult<Option<String>> {
    let path = decide_config_file(config_file);
    let contents = read_file(&path)?;
    let sections = parse_sections(&contents, &path)?;

    let Some(option) = DEFAULT_OPTIONS.iter().find(|o| o.name == OPTION_LOG_LEVEL) else {
        return Ok(None);
    };
    let level = [CRED_SECTION, DEFAULT_SECTION]
        .iter()
        .filter_map(|name| sections.get(*name))
        .flat_map(|section| section.iter())
        .find(|(name, value)| option.matches(name) && !value.is_empty())
        .map(|(_, value)| value.clone());
    Ok(level)
}

fn read_file(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

fn parse_sections(yaml: &str, path: &Path) -> ConfigResult<Sections> {
    if yaml.trim().is_empty() {
        return Ok(Sections::new());
    }

    let parse_error = |error: String| ConfigError::Parse {
        path: path.to_path_buf(),
        error,
    };
    let raw: BTreeMap<String, Option<BTreeMap<String, Value>>> =
        serde_yaml::from_str(yaml).map_err(|e| parse_error(e.to_string()))?;

    let mut sections = Sections::new();
    for (section, options) in raw {
        let mut values = BTreeMap::new();
        for (name, value) in options.unwrap_or_default() {
            let value = scalar_to_string(&value).ok_or_else(|| {
                parse_error(format!("option '{name}' in section '{section}' must be a scalar"))
            })?;
            values.insert(name.trim().to_string(), value.trim().to_string());
        }
        sections.insert(section.trim().to_string(), values);
    }
    Ok(sections)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
