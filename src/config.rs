use std::path::PathBuf;

use crate::services::locale_store::store::STORE_FILE;

pub const STORE_ENV: &str = "LOCALE_CORE_STORE";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            store_path: store_path(),
        }
    }
}

fn store_path() -> PathBuf {
    if let Some(explicit) = std::env::var_os(STORE_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(explicit);
    }
    if let Some(local) = std::env::var_os("LOCALAPPDATA").filter(|v| !v.is_empty()) {
        return PathBuf::from(local).join("LocaleCore").join(STORE_FILE);
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(STORE_FILE)
}
