//! Core configuration types
//!
//! A configuration file is a YAML mapping of section name to a mapping of
//! option name to scalar value. Loading flattens it into an [`OptionMap`].

use serde::Serialize;
use std::collections::BTreeMap;

/// Section holding credentials; every configuration file must have it
pub const CRED_SECTION: &str = "Credentials";

/// Section holding general defaults such as timeouts and proxy settings
pub const DEFAULT_SECTION: &str = "Default";

/// Pair section: bucket name to endpoint
pub const BUCKET_ENDPOINT_SECTION: &str = "Bucket-Endpoint";

/// Pair section: bucket name to CNAME
pub const BUCKET_CNAME_SECTION: &str = "Bucket-Cname";

/// Pair section: user-defined access key service URLs
pub const AK_SERVICE_SECTION: &str = "AkService";

/// Sections kept as nested name to value maps
pub const PAIR_SECTIONS: &[&str] = &[
    BUCKET_ENDPOINT_SECTION,
    BUCKET_CNAME_SECTION,
    AK_SERVICE_SECTION,
];

/// A loaded option: either a plain value or a per-resource mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Plain(String),
    Section(BTreeMap<String, String>),
}

impl OptionValue {
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            OptionValue::Plain(value) => Some(value),
            OptionValue::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            OptionValue::Plain(_) => None,
            OptionValue::Section(pairs) => Some(pairs),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Plain(value.to_string())
    }
}

/// Option name to loaded value
pub type OptionMap = BTreeMap<String, OptionValue>;

/// Value constraint checked after loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    String,
    /// Must parse as a signed 64-bit integer
    Int64,
    /// Must be one of the listed values, compared case-insensitively
    Alternative(&'static [&'static str]),
}

/// A known option and the spellings accepted for it in a file
#[derive(Debug, Clone, Copy)]
pub struct ConfigOption {
    /// Canonical name used as the key of the loaded map
    pub name: &'static str,
    /// Accepted spellings, matched case-insensitively
    pub show_names: &'static [&'static str],
    /// Whether the value may be printed without masking
    pub reveal: bool,
    pub option_type: OptionType,
}

impl ConfigOption {
    pub fn matches(&self, name: &str) -> bool {
        self.show_names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_value_accessors() {
        let plain = OptionValue::from("cn-hangzhou");
        assert_eq!(plain.as_plain(), Some("cn-hangzhou"));
        assert!(plain.as_section().is_none());

        let mut pairs = BTreeMap::new();
        pairs.insert("bucket".to_string(), "oss.example.com".to_string());
        let section = OptionValue::Section(pairs);
        assert!(section.as_plain().is_none());
        assert_eq!(section.as_section().map(BTreeMap::len), Some(1));
    }

    #[test]
    fn test_option_value_serializes_untagged() {
        let mut map = OptionMap::new();
        map.insert("endpoint".to_string(), OptionValue::from("e"));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"endpoint":"e"}"#);
    }
}
