use rusqlite::{params, Connection};
use std::cell::RefCell;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::config::TitleLimits;
use crate::session::{
    assemble, AssemblyObserver, AssemblyOutcome, DropReason, NoopObserver, RawRecord,
    RecordStore, SchemaVariant, Session,
};

/// Build raw records from `(key, value)` pairs
pub fn raw_records(rows: &[(&str, &str)]) -> Vec<RawRecord> {
    rows.iter().map(|(k, v)| RawRecord::new(*k, *v)).collect()
}

/// Classify and assemble rows with default title limits
pub fn assemble_rows(rows: &[(&str, &str)]) -> Vec<Session> {
    let store = RecordStore::from_records(raw_records(rows), &NoopObserver);
    assemble(&store, &TitleLimits::default(), &NoopObserver)
}

/// Same as `assemble_rows`, also returning what the observer saw
pub fn assemble_observed(rows: &[(&str, &str)]) -> (Vec<Session>, RecordingObserver) {
    let observer = RecordingObserver::default();
    let store = RecordStore::from_records(raw_records(rows), &observer);
    let sessions = assemble(&store, &TitleLimits::default(), &observer);
    (sessions, observer)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Assembled(usize),
    Dropped(DropReason),
    Failed(String),
}

/// Observer that keeps every callback for later assertions
#[derive(Default)]
pub struct RecordingObserver {
    pub classified: RefCell<Vec<(String, SchemaVariant)>>,
    pub sessions: RefCell<Vec<(String, Recorded)>>,
}

impl RecordingObserver {
    pub fn outcome_for(&self, key: &str) -> Option<Recorded> {
        self.sessions
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, outcome)| outcome.clone())
    }
}

impl AssemblyObserver for RecordingObserver {
    fn record_classified(&self, key: &str, variant: SchemaVariant) {
        self.classified.borrow_mut().push((key.to_string(), variant));
    }

    fn session_assembled(&self, key: &str, outcome: &AssemblyOutcome<'_>) {
        let recorded = match outcome {
            AssemblyOutcome::Assembled { message_count } => Recorded::Assembled(*message_count),
            AssemblyOutcome::Dropped(reason) => Recorded::Dropped(*reason),
            AssemblyOutcome::Failed(error) => Recorded::Failed(error.to_string()),
        };
        self.sessions.borrow_mut().push((key.to_string(), recorded));
    }
}

/// Column value for a test database row
pub enum TestValue<'a> {
    Text(&'a str),
    Blob(&'a [u8]),
    Null,
}

/// Create a `state.vscdb`-shaped database in a fresh temp dir
pub fn create_test_db(rows: &[(&str, TestValue<'_>)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.vscdb");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE cursorDiskKV (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);
         CREATE TABLE ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);",
    )
    .unwrap();

    for (key, value) in rows {
        match value {
            TestValue::Text(text) => conn
                .execute(
                    "INSERT INTO cursorDiskKV (key, value) VALUES (?1, ?2)",
                    params![key, text],
                )
                .unwrap(),
            TestValue::Blob(bytes) => conn
                .execute(
                    "INSERT INTO cursorDiskKV (key, value) VALUES (?1, ?2)",
                    params![key, bytes],
                )
                .unwrap(),
            TestValue::Null => conn
                .execute(
                    "INSERT INTO cursorDiskKV (key, value) VALUES (?1, NULL)",
                    params![key],
                )
                .unwrap(),
        };
    }

    (dir, path)
}

// Shared fixtures

pub const LEGACY_SCENARIO: &str =
    r#"{"name":"","conversation":[{"type":1,"text":"Fix the bug\nin parser","timingInfo":{}}]}"#;

/// Fragmented session `s1` with headers `a`, `b`, `c`
pub const MANIFEST_ABC: &str = r#"{
    "_v": 3,
    "data": {
        "composerId": "s1",
        "name": "Refactor",
        "createdAt": 1700000000000,
        "lastUpdatedAt": 1700000009000,
        "fullConversationHeadersOnly": [
            {"fragmentId": "a", "type": 1},
            {"fragmentId": "b", "type": 2},
            {"fragmentId": "c", "type": 1}
        ]
    }
}"#;
