//! SQLite-backed store reader for `state.vscdb`.

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::session::RawRecord;

use super::StoreReader;

/// Table holding Cursor's chat records
pub const KV_TABLE: &str = "cursorDiskKV";

/// Read-only view of a Cursor database file
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Fails with `StoreNotFound` when the file does not exist, so that nothing
    /// is exported from a mistyped path
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let path = path.into();
        if !path.is_file() {
            return Err(ExportError::StoreNotFound(path));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreReader for SqliteStore {
    fn read_all(&self) -> Result<Vec<RawRecord>, ExportError> {
        let connection = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let mut stmt = connection.prepare(&format!("SELECT key, value FROM {}", KV_TABLE))?;
        let mut rows = stmt.query([])?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        while let Some(row) = rows.next()? {
            let key: String = row.get(0)?;
            match text_value(row.get_ref(1)?) {
                Some(value) => records.push(RawRecord { key, value }),
                None => {
                    log::debug!("Skipping non-text value for key {}", key);
                    skipped += 1;
                }
            }
        }

        log::info!(
            "Read {} records from {:?} ({} skipped)",
            records.len(),
            self.path,
            skipped
        );
        Ok(records)
    }
}

/// TEXT as-is, BLOB decoded as UTF-8; anything else is not a record
fn text_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8(bytes.to_vec()).ok(),
        _ => None,
    }
}
