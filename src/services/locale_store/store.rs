use super::hash;
use super::model::SourceRow;
use crate::error::DatabaseError;
use log::warn;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const STORE_FILE: &str = "locales_source.json";

fn storage_err(path: &Path, what: &str, e: impl std::fmt::Display) -> DatabaseError {
    DatabaseError::Storage(format!("failed to {what} {}: {e}", path.display()))
}

/// `locales_source` rows persisted as a JSON array.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    path: PathBuf,
}

impl LocaleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocaleStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<SourceRow>, DatabaseError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path).map_err(|e| storage_err(&self.path, "read", e))?;

        let mut rows: Vec<SourceRow> =
            serde_json::from_str(&data).map_err(|e| storage_err(&self.path, "parse", e))?;

        let mut migrated = false;
        for row in rows.iter_mut() {
            migrated |= ensure_hash(row);
        }

        if migrated {
            warn!("filled missing source hashes in {}", self.path.display());
            self.save(&rows)?;
        }

        Ok(rows)
    }

    pub fn save(&self, rows: &[SourceRow]) -> Result<(), DatabaseError> {
        let mut v: Vec<SourceRow> = rows.to_vec();

        for row in v.iter_mut() {
            ensure_hash(row);
        }
        v.sort_by_key(|r| r.lid);

        let json = serde_json::to_string_pretty(&v).map_err(|e| storage_err(&self.path, "serialize", e))?;

        write_atomic(&self.path, json.as_bytes())
    }

    /// `lid` of the first row whose source matches exactly.
    pub fn find_lid(&self, source: &str) -> Result<Option<i64>, DatabaseError> {
        let h = hash::hash_source(source);

        Ok(self
            .load()?
            .iter()
            .find(|r| r.hash == h && r.source == source)
            .map(|r| r.lid))
    }

    /// Appends `row` with the next free `lid` and returns that `lid`.
    pub fn insert(&self, mut row: SourceRow) -> Result<i64, DatabaseError> {
        let mut rows = self.load()?;

        let lid = match rows.iter().map(|r| r.lid).max() {
            None => 1,
            Some(m) => m
                .checked_add(1)
                .ok_or_else(|| DatabaseError::Storage("lid space exhausted".to_string()))?,
        };
        row.lid = lid;
        ensure_hash(&mut row);
        rows.push(row);

        self.save(&rows)?;

        Ok(lid)
    }
}

fn ensure_hash(row: &mut SourceRow) -> bool {
    if row.hash.is_empty() {
        row.hash = hash::hash_source(&row.source);
        return true;
    }
    false
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DatabaseError> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| storage_err(parent, "create", e))?;
        }
    }

    fs::write(&tmp, bytes).map_err(|e| storage_err(&tmp, "write", e))?;

    // rename replaces an existing store in one step; the old file stays until then
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(storage_err(path, "rename into", e));
    }

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => STORE_FILE.to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
