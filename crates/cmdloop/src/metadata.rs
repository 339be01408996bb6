//! Serializable view of a registry, for tooling that wants the argument table
//! without running the program.

use serde::{Deserialize, Serialize};

use crate::argument::Argument;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ArgumentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_info: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub long_description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl From<&Argument> for ArgumentMeta {
    fn from(arg: &Argument) -> Self {
        Self {
            short: non_empty(&arg.short),
            long: non_empty(&arg.long),
            command: non_empty(&arg.command),
            data_info: non_empty(&arg.data_info),
            description: arg.description.clone(),
            long_description: arg.long_description.clone(),
            example: arg.example.clone(),
            flags: arg.flags.names().into_iter().map(str::to_string).collect(),
        }
    }
}
