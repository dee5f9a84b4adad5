//! `--list` handler

use std::io::Write;

use crate::error::ExportError;
use crate::export::format_timestamp;
use crate::session::{Session, SessionSummary};

/// Write one line per session: key, title, start and end time, tab separated.
/// With `json`, each line is a JSON object instead.
pub fn list_sessions(
    sessions: &[Session],
    json: bool,
    out: &mut dyn Write,
) -> Result<(), ExportError> {
    for session in sessions {
        if json {
            serde_json::to_writer(&mut *out, &SessionSummary::from(session))?;
            writeln!(out)?;
        } else {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                session.key,
                session.title,
                display_time(session.created_at),
                display_time(session.ended_at)
            )?;
        }
    }
    Ok(())
}

fn display_time(ms: Option<i64>) -> String {
    ms.and_then(format_timestamp)
        .unwrap_or_else(|| "-".to_string())
}
