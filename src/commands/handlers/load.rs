//! Store loading shared by the list and export handlers

use crate::config::TitleLimits;
use crate::error::ExportError;
use crate::session::{assemble, AssemblyObserver, RecordStore, Session};
use crate::store::StoreReader;

/// Read every record from `store` and assemble the qualifying sessions
pub fn load_sessions(
    store: &dyn StoreReader,
    limits: &TitleLimits,
    observer: &dyn AssemblyObserver,
) -> Result<Vec<Session>, ExportError> {
    let records = store.read_all()?;
    let total = records.len();

    let record_store = RecordStore::from_records(records, observer);
    let sessions = assemble(&record_store, limits, observer);

    log::info!(
        "{} records, {} decoded, {} sessions",
        total,
        record_store.len(),
        sessions.len()
    );
    Ok(sessions)
}
