//! Known options and value validation
//!
//! Option names in a file are resolved against these tables before loading,
//! so `access_key_id`, `AccessKeyId` and `access-id` all land on the same key.

use crate::config::types::{ConfigOption, OptionMap, OptionType};
use crate::error::{ConfigError, ConfigResult};

pub const OPTION_LANGUAGE: &str = "language";
pub const OPTION_LOG_LEVEL: &str = "loglevel";

const LANGUAGES: &[&str] = &["CH", "EN"];
const LOG_LEVELS: &[&str] = &["info", "debug"];
const MODES: &[&str] = &["AK", "StsToken", "RamRoleArn", "EcsRamRole"];

/// Options accepted in the credentials section
pub const CRED_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        name: OPTION_LANGUAGE,
        show_names: &["language", "Language"],
        reveal: true,
        option_type: OptionType::Alternative(LANGUAGES),
    },
    ConfigOption {
        name: "endpoint",
        show_names: &["endpoint", "host"],
        reveal: true,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "accessKeyID",
        show_names: &[
            "accessKeyID",
            "access_key_id",
            "access_id",
            "accessid",
            "access-key-id",
            "access-id",
        ],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "accessKeySecret",
        show_names: &[
            "accessKeySecret",
            "access_key_secret",
            "access_key",
            "accesskey",
            "access-key-secret",
            "access-key",
        ],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "stsToken",
        show_names: &["stsToken", "sts_token", "sts-token"],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "outputDir",
        show_names: &["outputDir", "output-dir", "output_dir", "output_directory"],
        reveal: true,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "mode",
        show_names: &["mode"],
        reveal: false,
        option_type: OptionType::Alternative(MODES),
    },
    ConfigOption {
        name: "ramRoleArn",
        show_names: &["ramRoleArn", "ram_role_arn", "ram-role-arn"],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "roleSessionName",
        show_names: &["roleSessionName", "role-session-name", "role_session_name"],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "externalId",
        show_names: &["externalId", "external-id", "external_id"],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "tokenTimeout",
        show_names: &["tokenTimeout", "token_timeout", "token-timeout"],
        reveal: false,
        option_type: OptionType::Int64,
    },
    ConfigOption {
        name: "stsRegion",
        show_names: &["stsRegion", "sts-region", "sts_region"],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "ecsRoleName",
        show_names: &["ecsRoleName", "ecs-role-name", "ecs_role_name"],
        reveal: false,
        option_type: OptionType::String,
    },
];

/// Options accepted in the default section
pub const DEFAULT_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        name: "userAgent",
        show_names: &["userAgent", "user-agent", "user_agent"],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: OPTION_LOG_LEVEL,
        show_names: &["loglevel", "log-level", "log_level"],
        reveal: false,
        option_type: OptionType::Alternative(LOG_LEVELS),
    },
    ConfigOption {
        name: "proxyHost",
        show_names: &["proxyHost", "proxy-host", "proxy_host"],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "proxyUser",
        show_names: &["proxyUser", "proxy-user", "proxy_user"],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "proxyPwd",
        show_names: &["proxyPwd", "proxy-pwd", "proxy_pwd"],
        reveal: false,
        option_type: OptionType::String,
    },
    ConfigOption {
        name: "readTimeOut",
        show_names: &["readTimeOut", "read-timeout", "read_timeout"],
        reveal: false,
        option_type: OptionType::Int64,
    },
    ConfigOption {
        name: "connectTimeOut",
        show_names: &["connectTimeOut", "connect-timeout", "connect_timeout"],
        reveal: false,
        option_type: OptionType::Int64,
    },
    ConfigOption {
        name: "retryTimes",
        show_names: &["retryTimes", "retry-times", "retry_times"],
        reveal: false,
        option_type: OptionType::Int64,
    },
];

/// Canonical name of a credentials-section spelling
pub fn cred_option_name(name: &str) -> Option<&'static str> {
    CRED_OPTIONS.iter().find(|o| o.matches(name)).map(|o| o.name)
}

/// Canonical name of a default-section spelling
pub fn default_option_name(name: &str) -> Option<&'static str> {
    DEFAULT_OPTIONS.iter().find(|o| o.matches(name)).map(|o| o.name)
}

/// Look up a known option by canonical name
pub fn find_option(name: &str) -> Option<&'static ConfigOption> {
    CRED_OPTIONS
        .iter()
        .chain(DEFAULT_OPTIONS)
        .find(|o| o.name == name)
}

/// Whether an option may be displayed as is. Unknown options are masked.
pub fn is_revealable(name: &str) -> bool {
    find_option(name).is_some_and(|o| o.reveal)
}

/// Hide all but the first and last two characters of a secret
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 4))
}

/// Validate the values of every known option
pub fn check_config(options: &OptionMap) -> ConfigResult<()> {
    for (name, value) in options {
        let Some(option) = find_option(name) else {
            continue;
        };
        let value = value
            .as_plain()
            .ok_or_else(|| ConfigError::NotPlain(name.clone()))?;

        match option.option_type {
            OptionType::String => {}
            OptionType::Int64 => {
                if value.parse::<i64>().is_err() {
                    return Err(ConfigError::NotAnInteger {
                        name: name.clone(),
                        value: value.to_string(),
                    });
                }
            }
            OptionType::Alternative(allowed) => {
                if !allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
                    return Err(ConfigError::NotAlternative {
                        name: name.clone(),
                        value: value.to_string(),
                        allowed: allowed.join("/"),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::OptionValue;

    #[test]
    fn test_alias_resolution_is_case_insensitive() {
        assert_eq!(cred_option_name("ACCESS_KEY_ID"), Some("accessKeyID"));
        assert_eq!(cred_option_name("host"), Some("endpoint"));
        assert_eq!(cred_option_name("region"), None);
        assert_eq!(default_option_name("Log-Level"), Some("loglevel"));
        assert_eq!(default_option_name("endpoint"), None);
    }

    #[test]
    fn test_option_names_are_unique() {
        let all: Vec<&str> = CRED_OPTIONS
            .iter()
            .chain(DEFAULT_OPTIONS)
            .map(|o| o.name)
            .collect();
        for (i, name) in all.iter().enumerate() {
            assert!(!all[i + 1..].contains(name), "duplicated option {}", name);
        }
    }

    #[test]
    fn test_check_int64() {
        let mut options = OptionMap::new();
        options.insert("retryTimes".to_string(), OptionValue::from("10"));
        assert!(check_config(&options).is_ok());

        options.insert("readTimeOut".to_string(), OptionValue::from("soon"));
        let result = check_config(&options);
        assert!(matches!(result, Err(ConfigError::NotAnInteger { name, .. }) if name == "readTimeOut"));
    }

    #[test]
    fn test_check_alternative() {
        let mut options = OptionMap::new();
        options.insert("language".to_string(), OptionValue::from("ch"));
        assert!(check_config(&options).is_ok());

        options.insert("loglevel".to_string(), OptionValue::from("trace"));
        match check_config(&options) {
            Err(ConfigError::NotAlternative { allowed, .. }) => assert_eq!(allowed, "info/debug"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_options_are_not_checked() {
        let mut options = OptionMap::new();
        options.insert("anything".to_string(), OptionValue::from("goes"));
        assert!(check_config(&options).is_ok());
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("LTAI5tExample"), "LT*********le");
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_revealable() {
        assert!(is_revealable("endpoint"));
        assert!(!is_revealable("accessKeySecret"));
        assert!(!is_revealable("custom-key"));
    }
}
