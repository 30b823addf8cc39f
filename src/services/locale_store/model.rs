use serde::{Deserialize, Serialize};

use crate::model::record::{default_textgroup, default_version};

/// One persisted `locales_source` row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub lid: i64,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default = "default_textgroup")]
    pub textgroup: String,

    pub source: String,

    #[serde(default)]
    pub context: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub hash: String,
}
