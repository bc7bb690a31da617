//! Machine-readable description of a command tree, for doc generators

use crate::cli::command::Command;
use crate::cli::flag::Flag;
use crate::i18n::Text;
use serde::Serialize;
use std::collections::BTreeMap;

/// One command, keyed in the export by its full space-joined path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub name: String,
    pub short: BTreeMap<String, String>,
    pub long: BTreeMap<String, String>,
    pub usage: String,
    pub sample: String,
    pub hidden: bool,
    pub flags: BTreeMap<String, FlagMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagMetadata {
    pub name: String,
    pub shorthand: Option<char>,
    pub short: BTreeMap<String, String>,
    pub long: BTreeMap<String, String>,
    #[serde(rename = "default")]
    pub default_value: Option<String>,
    pub required: bool,
    pub aliases: Vec<String>,
    #[serde(rename = "assign_mode")]
    pub assigned_mode: i32,
    pub persistent: bool,
    pub hidden: bool,
    pub category: Option<String>,
}

impl From<&Flag> for FlagMetadata {
    fn from(flag: &Flag) -> Self {
        FlagMetadata {
            name: flag.name.clone(),
            shorthand: flag.shorthand,
            short: text_data(flag.short.as_ref()),
            long: text_data(flag.long.as_ref()),
            default_value: flag.default_value.clone(),
            required: flag.required,
            aliases: flag.aliases.clone(),
            assigned_mode: flag.assigned_mode.code(),
            persistent: flag.persistent,
            hidden: flag.hidden,
            category: flag.category.clone(),
        }
    }
}

fn text_data(text: Option<&Text>) -> BTreeMap<String, String> {
    text.map(Text::data).unwrap_or_default()
}

impl Command {
    /// Export this command and every descendant, hidden ones included
    pub fn metadata(&self) -> BTreeMap<String, Metadata> {
        let mut out = BTreeMap::new();
        self.collect_metadata("", &mut out);
        out
    }

    fn collect_metadata(&self, prefix: &str, out: &mut BTreeMap<String, Metadata>) {
        let path = if prefix.is_empty() {
            self.name().to_string()
        } else {
            format!("{prefix} {}", self.name())
        };

        let flags = self
            .flags()
            .flags()
            .iter()
            .map(|f| (f.name.clone(), FlagMetadata::from(f)))
            .collect();
        out.insert(
            path.clone(),
            Metadata {
                name: self.name().to_string(),
                short: text_data(self.short_text()),
                long: text_data(self.long_text()),
                usage: self.usage_text().to_string(),
                sample: self.sample_text().to_string(),
                hidden: self.is_hidden(),
                flags,
            },
        );

        for sub in self.sub_commands() {
            sub.collect_metadata(&path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::flag::AssignedMode;

    fn tree() -> Command {
        Command::new("oss")
            .short(Text::new("Object storage", "对象存储"))
            .flag(Flag::new("profile").shorthand('p').persistent())
            .sub_command(
                Command::new("cp")
                    .usage("cp <src> <dst>")
                    .flag(Flag::new("recursive").shorthand('r').mode(AssignedMode::Boolean))
                    .flag(Flag::new("meta").mode(AssignedMode::Repeatable).category("Object"))
                    .sub_command(Command::new("deep").hidden()),
            )
    }

    #[test]
    fn test_one_entry_per_node() {
        let meta = tree().metadata();
        let keys: Vec<&str> = meta.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["oss", "oss cp", "oss cp deep"]);
        assert!(meta["oss cp deep"].hidden);
        assert_eq!(meta["oss"].short["en"], "Object storage");
        assert_eq!(meta["oss cp"].usage, "cp <src> <dst>");
    }

    #[test]
    fn test_flag_records() {
        let meta = tree().metadata();
        let cp = &meta["oss cp"].flags;
        assert_eq!(cp["recursive"].shorthand, Some('r'));
        assert_eq!(cp["recursive"].assigned_mode, -1);
        assert_eq!(cp["meta"].assigned_mode, 9);
        assert_eq!(cp["meta"].category.as_deref(), Some("Object"));
        assert!(meta["oss"].flags["profile"].persistent);
    }

    #[test]
    fn test_metadata_is_idempotent() {
        let root = tree();
        assert_eq!(root.metadata(), root.metadata());
    }

    #[test]
    fn test_serializes_with_export_names() {
        let json = serde_json::to_value(tree().metadata()).unwrap();
        let flag = &json["oss cp"]["flags"]["recursive"];
        assert_eq!(flag["assign_mode"], -1);
        assert!(flag.get("default").is_some());
    }
}
