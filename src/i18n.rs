//! Localized text
//!
//! Commands and flags carry their descriptions as [`Text`] values holding one
//! string per supported language. The language is picked once per invocation
//! and stored on the execution context.

use std::collections::BTreeMap;
use std::env;
use std::fmt;

/// Environment variable that forces the display language
pub const LANGUAGE_ENV: &str = "CMDTREE_LANGUAGE";

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// Locale key used in exported metadata
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Parse a language name as written in flags and config files.
    ///
    /// Accepts `EN`/`CH` (the config file spelling) as well as locale strings
    /// such as `zh_CN.UTF-8`.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "ch" || lower.starts_with("zh") {
            Some(Language::Zh)
        } else if lower.starts_with("en") {
            Some(Language::En)
        } else {
            None
        }
    }

    /// Detect the language from `CMDTREE_LANGUAGE`, then `LC_ALL`, then `LANG`
    pub fn from_env() -> Self {
        [LANGUAGE_ENV, "LC_ALL", "LANG"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find_map(|value| Language::parse(&value))
            .unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A piece of text available in every supported language
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    en: String,
    zh: String,
}

impl Text {
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        Text {
            en: en.into(),
            zh: zh.into(),
        }
    }

    /// Get the text for a language, falling back to English when the
    /// translation is empty
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Zh if !self.zh.is_empty() => &self.zh,
            _ => &self.en,
        }
    }

    /// Locale key to text, as exported in command metadata
    pub fn data(&self) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        data.insert(Language::En.code().to_string(), self.en.clone());
        data.insert(Language::Zh.code().to_string(), self.zh.clone());
        data
    }
}
