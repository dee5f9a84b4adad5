use std::fs;
use std::io;
use std::path::PathBuf;

use crate::commands::{export_sessions, list_sessions, load_sessions};
use crate::config::TitleLimits;
use crate::export::{DirectoryWriter, DocumentWriter};
use crate::session::NoopObserver;
use crate::store::SqliteStore;

use super::test_helpers::{
    assemble_rows, create_test_db, TestValue, LEGACY_SCENARIO, MANIFEST_ABC,
};

fn sample_db() -> (tempfile::TempDir, PathBuf) {
    create_test_db(&[
        ("inlineDiffsData", TestValue::Text(r#"{"conversation":[]}"#)),
        ("composerData:empty", TestValue::Text("[]")),
        ("composerData:broken", TestValue::Text("{oops")),
        ("composerData:abc", TestValue::Text(LEGACY_SCENARIO)),
        ("composerData:s1", TestValue::Blob(MANIFEST_ABC.as_bytes())),
        ("fragment:s1:a", TestValue::Text(r#"{"type":1,"text":"What/why?"}"#)),
        ("fragment:s1:b", TestValue::Text(r#"{"type":2,"text":"Because."}"#)),
    ])
}

#[test]
fn test_load_and_export_end_to_end() {
    let (_db_dir, db_path) = sample_db();
    let store = SqliteStore::open(&db_path).unwrap();
    let sessions = load_sessions(&store, &TitleLimits::default(), &NoopObserver).unwrap();

    // Legacy session has no created time and sorts first
    let keys: Vec<_> = sessions.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["composerData:abc", "composerData:s1"]);

    let out_dir = tempfile::TempDir::new().unwrap();
    let mut writer = DirectoryWriter::new(out_dir.path());
    let report = export_sessions(&sessions, &mut writer);

    assert!(report.failed.is_empty());
    assert_eq!(report.exported.len(), 2);
    let legacy = fs::read_to_string(out_dir.path().join("Fix the bug.md")).unwrap();
    assert!(legacy.contains("> Fix the bug\nin parser"));
    let fragmented = fs::read_to_string(out_dir.path().join("Refactor.md")).unwrap();
    assert!(fragmented.contains("> What/why?"));
    assert!(fragmented.contains("## Assistant\n\nBecause."));
}

#[test]
fn test_export_uses_sanitized_title() {
    let rows = [(
        "composerData:x",
        r#"{"name":"a/b: c?","conversation":[{"type":1,"text":"hi"}]}"#,
    )];
    let sessions = assemble_rows(&rows);
    let out_dir = tempfile::TempDir::new().unwrap();
    let mut writer = DirectoryWriter::new(out_dir.path());

    let report = export_sessions(&sessions, &mut writer);

    assert_eq!(report.exported, vec![out_dir.path().join("a_b_ c_.md")]);
}

/// Writer that refuses one name and records the rest
struct FailingWriter {
    refuse: &'static str,
    written: Vec<String>,
}

impl DocumentWriter for FailingWriter {
    fn write(&mut self, name: &str, _content: &str) -> io::Result<PathBuf> {
        if name == self.refuse {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.written.push(name.to_string());
        Ok(PathBuf::from(format!("{}.md", name)))
    }
}

#[test]
fn test_failed_write_skips_only_that_session() {
    let rows = [
        ("composerData:abc", LEGACY_SCENARIO),
        ("composerData:ok", r#"{"name":"Fine","conversation":[{"type":1,"text":"x"}]}"#),
    ];
    let sessions = assemble_rows(&rows);
    let mut writer = FailingWriter {
        refuse: "Fix the bug",
        written: Vec::new(),
    };

    let report = export_sessions(&sessions, &mut writer);

    assert_eq!(report.exported.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].to_string().contains("composerData:abc"));
    assert_eq!(writer.written, ["Fine"]);
}

#[test]
fn test_list_prints_one_line_per_session() {
    let rows = [
        ("composerData:abc", LEGACY_SCENARIO),
        ("composerData:t", r#"{"name":"Timed","createdAt":1000,"conversation":[{"type":1,"text":"x","timingInfo":{"clientEndTime":2000}}]}"#),
    ];
    let sessions = assemble_rows(&rows);
    let mut out = Vec::new();

    list_sessions(&sessions, false, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "composerData:abc\tFix the bug\t-\t-");
    let expected = format!(
        "composerData:t\tTimed\t{}\t{}",
        crate::export::format_timestamp(1000).unwrap(),
        crate::export::format_timestamp(2000).unwrap()
    );
    assert_eq!(lines[1], expected);
}

#[test]
fn test_list_json_lines() {
    let sessions = assemble_rows(&[("composerData:abc", LEGACY_SCENARIO)]);
    let mut out = Vec::new();

    list_sessions(&sessions, true, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(parsed["key"], "composerData:abc");
    assert_eq!(parsed["title"], "Fix the bug");
    assert_eq!(parsed["createdAt"], serde_json::Value::Null);
    assert_eq!(parsed["messageCount"], 1);
}
