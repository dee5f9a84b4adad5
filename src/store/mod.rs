//! Store access - reads raw key/value rows out of Cursor's database.

mod sqlite;

pub use sqlite::{SqliteStore, KV_TABLE};

use crate::error::ExportError;
use crate::session::RawRecord;

/// Source of raw key/value records
pub trait StoreReader {
    /// Read every record eagerly, in store order
    fn read_all(&self) -> Result<Vec<RawRecord>, ExportError>;
}
