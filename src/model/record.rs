use serde::{Deserialize, Serialize};

pub const FIELD_LOCATION: &str = "location";
pub const FIELD_TEXTGROUP: &str = "textgroup";
pub const FIELD_SOURCE: &str = "source";
pub const FIELD_CONTEXT: &str = "context";
pub const FIELD_VERSION: &str = "version";

pub const DEFAULT_TEXTGROUP: &str = "default";
pub const DEFAULT_VERSION: &str = "none";

pub fn default_textgroup() -> String {
    DEFAULT_TEXTGROUP.to_string()
}

pub fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// Metadata of a translatable string, as stored in `locales_source`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default = "default_textgroup")]
    pub textgroup: String,

    pub source: String,

    #[serde(default)]
    pub context: String,

    #[serde(default = "default_version")]
    pub version: String,
}
